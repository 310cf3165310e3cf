//! Single-device identity lookup.

use apicly_core::{DeviceIdentity, IdentityResolver, Session};

use crate::cli::{DeviceArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

fn detail(d: &DeviceIdentity) -> String {
    [
        format!("ID:       {}", d.device_id),
        format!("Hostname: {}", or_dash(&d.hostname)),
        format!("Type:     {}", or_dash(&d.device_type)),
        format!("Serial:   {}", or_dash(&d.serial_number)),
    ]
    .join("\n")
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

pub async fn handle(
    session: &Session,
    args: DeviceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let resolver = IdentityResolver::new(session);

    let identity = match (args.management_ip, args.id) {
        (Some(ip), _) => resolver.resolve_by_management_ip(ip).await?,
        (None, Some(id)) => resolver.resolve_by_device_id(&id).await?,
        (None, None) => {
            return Err(CliError::Validation {
                field: "device".into(),
                reason: "give a management IP address or --id".into(),
            });
        }
    };

    let out = output::render_single(&global.output, &identity, detail, |d| {
        format!("{}\t{}\t{}", d.hostname, d.device_type, d.serial_number)
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
