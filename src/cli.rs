use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::internal::config::config::AppConfig;
use crate::internal::logger::Severity;

/// Everything one run of the command-line logger needs
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub settings: AppConfig,
    pub level: Severity,
    pub sender: Option<String>,
    /// Message from the arguments; `None` means read lines from stdin
    pub message: Option<String>,
    pub print_config: bool,
}

fn parse_severity(value: &str) -> Result<Severity, String> {
    value.parse::<Severity>().map_err(|e| e.to_string())
}

pub fn build_cli() -> Command {
    // Leak the version string to get a 'static lifetime
    let version: &'static str =
        Box::leak(crate::internal::config::get_version_info().into_boxed_str());

    Command::new("micro-logger")
        .version(version)
        .about("Append tagged, timestamped messages to a log file and/or the console")
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .short('f')
                .help("Path to the log file (created with its directory if missing)"),
        )
        .arg(
            Arg::new("tee")
                .long("tee")
                .action(ArgAction::SetTrue)
                .help("Also print to the console when a log file is configured"),
        )
        .arg(
            Arg::new("no-tee")
                .long("no-tee")
                .action(ArgAction::SetTrue)
                .conflicts_with("tee")
                .help("Only write to the log file, overriding `tee` from settings"),
        )
        .arg(
            Arg::new("suppress")
                .long("suppress")
                .short('s')
                .value_delimiter(',')
                .action(ArgAction::Append)
                .value_parser(parse_severity)
                .help("Severities to silence (debug,warning,error,info,success,text)"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .action(ArgAction::SetTrue)
                .help("Disable ANSI colors on console output"),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .short('l')
                .value_parser(parse_severity)
                .default_value("info")
                .help("Severity of the logged message(s)"),
        )
        .arg(
            Arg::new("sender")
                .long("sender")
                .help("Sender name shown in brackets after the severity"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to config file (default: ./micro-logger.*, /etc/micro-logger/config.*)"),
        )
        .arg(
            Arg::new("print-config")
                .long("print-config")
                .action(ArgAction::SetTrue)
                .help("Print the effective settings as YAML and exit"),
        )
        .arg(
            Arg::new("message")
                .num_args(1..)
                .trailing_var_arg(true)
                .help("Message to log; lines are read from stdin when omitted"),
        )
}

/// Load settings from files and environment, then apply command-line overrides
pub fn parse_invocation(matches: &ArgMatches) -> anyhow::Result<Invocation> {
    let config_file = matches.get_one::<String>("config").map(|s| s.as_str());
    let settings = AppConfig::load(config_file)?;
    Ok(apply_overrides(settings, matches))
}

pub fn apply_overrides(mut settings: AppConfig, matches: &ArgMatches) -> Invocation {
    if let Some(path) = matches.get_one::<String>("log-file") {
        settings.output_path = Some(path.clone());
    }

    if matches.get_flag("tee") {
        settings.tee = true;
    } else if matches.get_flag("no-tee") {
        settings.tee = false;
    }

    if let Some(tags) = matches.get_many::<Severity>("suppress") {
        settings.suppress = tags.copied().collect();
    }

    if matches.get_flag("no-color") {
        settings.color = false;
    }

    let level = matches
        .get_one::<Severity>("level")
        .copied()
        .unwrap_or(Severity::Info);

    let message = matches
        .get_many::<String>("message")
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "));

    Invocation {
        settings,
        level,
        sender: matches.get_one::<String>("sender").cloned(),
        message,
        print_config: matches.get_flag("print-config"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(args: &[&str]) -> Invocation {
        let matches = build_cli()
            .try_get_matches_from(std::iter::once("micro-logger").chain(args.iter().copied()))
            .unwrap();
        apply_overrides(AppConfig::default(), &matches)
    }

    #[test]
    fn defaults_to_info_on_console() {
        let inv = invocation(&["hello", "world"]);
        assert_eq!(inv.level, Severity::Info);
        assert_eq!(inv.message.as_deref(), Some("hello world"));
        assert_eq!(inv.settings.destination(), "");
        assert!(inv.settings.color);
        assert!(!inv.print_config);
    }

    #[test]
    fn overrides_settings_from_flags() {
        let inv = invocation(&[
            "--log-file",
            "logs/app.log",
            "--tee",
            "--suppress",
            "debug,text",
            "--no-color",
            "--level",
            "error",
            "--sender",
            "cron",
            "disk",
            "full",
        ]);
        assert_eq!(inv.settings.destination(), "logs/app.log");
        assert!(inv.settings.tee);
        assert!(!inv.settings.color);
        assert_eq!(inv.settings.suppress, vec![Severity::Debug, Severity::Text]);
        assert_eq!(inv.level, Severity::Error);
        assert_eq!(inv.sender.as_deref(), Some("cron"));
        assert_eq!(inv.message.as_deref(), Some("disk full"));
    }

    #[test]
    fn no_tee_overrides_settings() {
        let matches = build_cli()
            .try_get_matches_from(["micro-logger", "--no-tee", "--log-file", "app.log", "x"])
            .unwrap();
        let settings = AppConfig {
            tee: true,
            ..AppConfig::default()
        };
        let inv = apply_overrides(settings, &matches);
        assert!(!inv.settings.tee);
        assert!(!inv.settings.to_options().tee);
    }

    #[test]
    fn tee_and_no_tee_conflict() {
        let result = build_cli().try_get_matches_from(["micro-logger", "--tee", "--no-tee", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_message_reads_stdin() {
        let inv = invocation(&["--level", "text"]);
        assert_eq!(inv.level, Severity::Text);
        assert!(inv.message.is_none());
    }

    #[test]
    fn rejects_unknown_severity() {
        let result = build_cli().try_get_matches_from(["micro-logger", "--level", "loud", "x"]);
        assert!(result.is_err());
    }
}
