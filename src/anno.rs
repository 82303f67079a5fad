extern crate clap;
use clap::*;

mod cmd_anno;

fn main() -> anyhow::Result<()> {
    let app = Command::new("anno")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`anno` - Ab initio gene annotation toolkit")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_anno::gff::make_subcommand())
        .subcommand(cmd_anno::pl::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* Annotations:
    * gff - GFF operations: prot

* Pipelines:
    * pl - External tool pipelines: augustus, blastp

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("gff", sub_matches)) => cmd_anno::gff::execute(sub_matches),
        Some(("pl", sub_matches)) => cmd_anno::pl::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
