use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

pub fn build_cli() -> Command {
    Command::new("gwadmin")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive operator console for a self-hosted groupware server")
        .long_about("gwadmin presents a menu for administering a groupware server and its supporting stack (database, cache, web server, mail relay, directory service, containers). Each menu action runs the matching administrative command and prints the result. Console state is kept in a JSON variables file that is written back on exit.")
        .arg(
            Arg::new("variables")
                .long("variables")
                .short('f')
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Variables file to load and save (default: ./variables.json, or $GWADMIN_VARIABLES_FILE)")
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Exit with an error if the variables file is missing or unreadable instead of starting empty")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue)
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let matches = build_cli().try_get_matches_from(vec!["gwadmin"]).unwrap();
        assert!(matches.get_one::<PathBuf>("variables").is_none());
        assert!(!matches.get_flag("strict"));
        assert!(!matches.get_flag("verbose"));
        assert!(!matches.get_flag("quiet"));
    }

    #[test]
    fn test_cli_variables_path() {
        let matches = build_cli()
            .try_get_matches_from(vec![
                "gwadmin",
                "--variables",
                "/var/lib/gwadmin/variables.json",
                "--strict",
            ])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>("variables").unwrap(),
            &PathBuf::from("/var/lib/gwadmin/variables.json")
        );
        assert!(matches.get_flag("strict"));
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        let result = build_cli().try_get_matches_from(vec!["gwadmin", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_subcommands() {
        let result = build_cli().try_get_matches_from(vec!["gwadmin", "status"]);
        assert!(result.is_err());
    }
}
