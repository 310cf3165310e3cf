//! Fleet license report handler.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;

use apicly_core::{FleetReportRow, LicenseAggregator, Session};

use crate::cli::{GlobalOpts, LicensesArgs};
use crate::error::CliError;
use crate::output;

use super::util;

const DEFAULT_FILE: &str = "licenses.csv";

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LicenseRow {
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Licenses")]
    licenses: String,
}

impl From<&FleetReportRow> for LicenseRow {
    fn from(r: &FleetReportRow) -> Self {
        Self {
            hostname: r.hostname.clone(),
            serial: r.serial_number.clone(),
            licenses: r.licenses.join(", "),
        }
    }
}

fn plain_line(r: &FleetReportRow) -> String {
    let mut fields = vec![r.hostname.as_str(), r.serial_number.as_str()];
    fields.extend(r.licenses.iter().map(String::as_str));
    fields.join("\t")
}

// ── Progress ────────────────────────────────────────────────────────

fn progress_bar(global: &GlobalOpts) -> ProgressBar {
    if global.quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} {pos}/{len} devices [{bar:30}] {elapsed}")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: LicensesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut aggregator = LicenseAggregator::new(session);
    if let Some(jobs) = args.jobs {
        aggregator = aggregator.with_concurrency(jobs);
    }

    // Ask for the file before the (possibly long) run, not after.
    let file = match (args.file, args.console) {
        (Some(path), _) => Some(path),
        (None, true) => None,
        (None, false) => Some(PathBuf::from(util::answer_with_default(
            "Output file name",
            DEFAULT_FILE,
        )?)),
    };

    let rows = match args.device {
        Some(ref id) => vec![aggregator.single_row(id).await?],
        None => {
            let bar = progress_bar(global);
            let rows = aggregator
                .aggregate_with_progress(|done, total| {
                    bar.set_length(u64::try_from(total).unwrap_or(u64::MAX));
                    bar.set_position(u64::try_from(done).unwrap_or(u64::MAX));
                })
                .await;
            bar.finish_and_clear();
            rows?
        }
    };

    if let Some(ref path) = file {
        let writer = BufWriter::new(File::create(path)?);
        output::write_fleet_csv(writer, &rows)?;
        if !global.quiet {
            let color = output::should_color(&global.color);
            eprintln!(
                "{}",
                output::success(
                    &format!("Wrote {} devices to {}", rows.len(), path.display()),
                    color
                )
            );
        }
    }

    if args.console {
        let out = output::render_list(&global.output, &rows, |r| LicenseRow::from(r), plain_line)?;
        output::print_output(&out, global.quiet);
    }

    Ok(())
}
