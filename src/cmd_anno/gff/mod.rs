// Subcommand modules for the `gff` command.
pub mod prot;

use clap::*;

pub fn make_subcommand() -> Command {
    Command::new("gff")
        .about("GFF operations: prot")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(prot::make_subcommand())
}

pub fn execute(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("prot", sub_matches)) => prot::execute(sub_matches),
        _ => unreachable!(),
    }
}
