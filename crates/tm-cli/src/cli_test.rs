use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_up_with_target() {
    let cli = Cli::try_parse_from(["tm", "up", "--target", "20"]).unwrap();
    match cli.command {
        Commands::Up(args) => {
            assert_eq!(args.target, Some(20));
            assert!(!args.dry_run);
        }
        other => panic!("expected Up, got {other:?}"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["tm", "down", "--dry-run", "-p", "proj", "--verbose"]).unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, PathBuf::from("proj"));
    assert!(matches!(cli.command, Commands::Down(MigrateArgs { target: None, dry_run: true })));
}

#[test]
fn test_negative_target_is_rejected() {
    assert!(Cli::try_parse_from(["tm", "up", "--target", "-5"]).is_err());
}
