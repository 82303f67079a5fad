pub mod augustus;
pub mod blastp;

pub fn make_subcommand() -> clap::Command {
    clap::Command::new("pl")
        .about("Pipeline tools")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(augustus::make_subcommand())
        .subcommand(blastp::make_subcommand())
}

pub fn execute(matches: &clap::ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("augustus", sub_matches)) => augustus::execute(sub_matches),
        Some(("blastp", sub_matches)) => blastp::execute(sub_matches),
        _ => unreachable!(),
    }
}
