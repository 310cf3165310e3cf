//! IP resolution command handler.

use std::net::IpAddr;

use apicly_core::{ClientFinding, ConfigurationFinding, IpResolver, ResolutionReport, Session};

use crate::cli::{GlobalOpts, IpArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

const PROMPT: &str = "Input q to exit or the IP address?";

// ── Rendering ───────────────────────────────────────────────────────

fn prose(reports: &[ResolutionReport]) -> String {
    reports
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `address<TAB>client-status<TAB>configuration-status` per report.
fn plain(reports: &[ResolutionReport]) -> String {
    reports
        .iter()
        .map(|r| {
            let client = match &r.client {
                ClientFinding::NotUsed => "-".to_owned(),
                ClientFinding::Connected {
                    device,
                    interface_label,
                    ..
                } => format!("{}:{interface_label}", device.hostname),
            };
            let configured = match &r.configuration {
                ConfigurationFinding::NotConfigured => "-".to_owned(),
                ConfigurationFinding::Interface { device, port_name } => {
                    format!("{}:{port_name}", device.hostname)
                }
                ConfigurationFinding::ManagementAddress { device } => device.hostname.clone(),
            };
            format!("{}\t{client}\t{configured}", r.address)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render(format: &OutputFormat, reports: &[ResolutionReport]) -> Result<String, CliError> {
    output::render_single(format, reports, prose, plain)
}

// ── Interactive input ───────────────────────────────────────────────

/// Next address typed by the user. Blank lines are skipped; `q` or the end
/// of stdin stops.
fn next_answer() -> Result<Option<String>, CliError> {
    while let Some(answer) = util::read_answer(PROMPT)? {
        if answer.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        if !answer.is_empty() {
            return Ok(Some(answer));
        }
    }
    Ok(None)
}

async fn interactive(resolver: &IpResolver, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    while let Some(answer) = next_answer()? {
        let Ok(ip) = answer.parse::<IpAddr>() else {
            eprintln!(
                "{}",
                output::warning(&format!("'{answer}' is not a valid IP address"), color)
            );
            continue;
        };

        match resolver.resolve(ip).await {
            Ok(report) => output::print_output(&render(&global.output, &[report])?, global.quiet),
            Err(e) if e.is_auth_failure() => return Err(e.into()),
            Err(e) => eprintln!("{}", output::warning(&format!("{ip}: {e}"), color)),
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(session: &Session, args: IpArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let resolver = IpResolver::new(session);

    if args.addresses.is_empty() {
        return interactive(&resolver, global).await;
    }

    let mut reports = Vec::with_capacity(args.addresses.len());
    for ip in args.addresses {
        reports.push(resolver.resolve(ip).await?);
    }

    let out = render(&global.output, &reports)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicly_core::DeviceIdentity;

    fn switch() -> DeviceIdentity {
        DeviceIdentity {
            device_id: "dev-sw".into(),
            hostname: "AHEC-2960C1".into(),
            device_type: "Cisco Catalyst 2960C-8PC-L Switch".into(),
            serial_number: "FOC1637Y3FJ".into(),
        }
    }

    #[test]
    fn plain_uses_dash_for_missing_findings() {
        let reports = [ResolutionReport {
            address: IpAddr::from([10, 2, 1, 22]),
            client: ClientFinding::Connected {
                device: switch(),
                interface_label: "GigabitEthernet0/2".into(),
                host_type: apicly_core::HostType::Wired,
            },
            configuration: ConfigurationFinding::NotConfigured,
        }];
        assert_eq!(plain(&reports), "10.2.1.22\tAHEC-2960C1:GigabitEthernet0/2\t-");
    }

    #[test]
    fn prose_separates_reports_with_blank_line() {
        let unknown = |last: u8| ResolutionReport {
            address: IpAddr::from([10, 9, 9, last]),
            client: ClientFinding::NotUsed,
            configuration: ConfigurationFinding::ManagementAddress { device: switch() },
        };
        let text = prose(&[unknown(1), unknown(2)]);
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("\n\nThe IP address 10.9.9.2"));
    }
}
