//! Command line parsing

use ci_core::{principal, ContactInteraction};

/// Run mode selected on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum RunMode {
    /// List the recent contacts of a principal
    List { principal: String },
    /// Print one card
    Show { principal: String, name: String },
    /// Print the address book properties and ACL
    Props { principal: String },
    /// Record an interaction
    Record(ContactInteraction),
    /// Run the cleanup job once
    Cleanup,
    /// Run the cleanup scheduler until interrupted
    Daemon,
    Help,
    Version,
}

/// Parse arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<RunMode, String> {
    let mut iter = args.iter().map(String::as_str);

    let Some(command) = iter.next() else {
        return Ok(RunMode::Help);
    };

    match command {
        "--help" | "-h" | "help" => Ok(RunMode::Help),
        "--version" | "-v" => Ok(RunMode::Version),
        "list" => Ok(RunMode::List {
            principal: principal_arg(iter.next())?,
        }),
        "props" => Ok(RunMode::Props {
            principal: principal_arg(iter.next())?,
        }),
        "show" => {
            let principal = principal_arg(iter.next())?;
            let name = iter.next().ok_or("show: missing card id")?.to_string();
            Ok(RunMode::Show { principal, name })
        }
        "record" => {
            let actor = iter.next().ok_or("record: missing actor uid")?;
            let mut interaction = ContactInteraction::new(actor);
            while let Some(flag) = iter.next() {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("record: {} needs a value", flag))?;
                match flag {
                    "--uid" => interaction = interaction.with_uid(value),
                    "--email" => interaction = interaction.with_email(value),
                    "--cloud-id" => interaction = interaction.with_federated_cloud_id(value),
                    other => return Err(format!("record: unknown option {}", other)),
                }
            }
            Ok(RunMode::Record(interaction))
        }
        "cleanup" => Ok(RunMode::Cleanup),
        "daemon" => Ok(RunMode::Daemon),
        other => Err(format!("unknown command: {}", other)),
    }
}

/// Accept a principal URI or a bare user id
fn principal_arg(arg: Option<&str>) -> Result<String, String> {
    let arg = arg.ok_or("missing principal")?;
    if arg.contains('/') {
        Ok(arg.to_string())
    } else {
        Ok(principal::user_principal(arg))
    }
}
