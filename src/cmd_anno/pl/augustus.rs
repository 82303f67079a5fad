use anyhow::bail;
use clap::*;
use log::{debug, info};
use std::fs;

use anno::libs::invoke::ToolCmd;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("augustus")
        .about("Pipeline - AUGUSTUS ab initio gene prediction")
        .after_help(
            r###"
Runs AUGUSTUS on a repeat-masked assembly and extracts the predicted protein
sequences.

* The pl-* subcommands
    * The default --outdir is `PL-*`, not `.`
    * There is no option to output to the screen

Stages:
1. augustus > <outdir>/augustus.gff3
   --uniqueGeneId=true --singlestrand=true --gff3=on --species=<SPECIES>
   --stopCodonExcludedFromCDS=false --softmasking=1
2. Parse the GFF3 and write <outdir>/augustus.faa, sorted by gene index and
   wrapped at 60 columns

`--singlestrand` predicts genes independently on each strand, allowing slight
overlap between neighboring genes on opposite strands.

A stage whose output artifact already exists is skipped, so an interrupted
run can be resumed by re-invoking the same command line.

Examples:
1. Predict genes on a masked assembly:
   anno pl augustus masked.fa --species fusarium_graminearum

2. Custom output location and binary:
   anno pl augustus masked.fa --species aspergillus_nidulans \
       -o PL-augustus --augustus-bin /opt/augustus/bin/augustus

"###,
        )
        .arg(
            Arg::new("assembly")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Repeat-masked genome assembly in FASTA format"),
        )
        .arg(
            Arg::new("species")
                .long("species")
                .short('s')
                .required(true)
                .num_args(1)
                .help("AUGUSTUS reference species"),
        )
        .arg(
            Arg::new("outdir")
                .long("outdir")
                .short('o')
                .num_args(1)
                .default_value("PL-augustus")
                .help("Output location"),
        )
        .arg(
            Arg::new("log_dir")
                .long("log-dir")
                .short('l')
                .num_args(1)
                .default_value("logs")
                .help("Log directory"),
        )
        .arg(
            Arg::new("augustus_bin")
                .long("augustus-bin")
                .num_args(1)
                .default_value("augustus")
                .help("Path to the augustus executable"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Log executed commands and skip notes"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let assembly = args.get_one::<String>("assembly").unwrap();
    let species = args.get_one::<String>("species").unwrap();
    let outdir = args.get_one::<String>("outdir").unwrap();
    let log_dir = args.get_one::<String>("log_dir").unwrap();
    let augustus_bin = args.get_one::<String>("augustus_bin").unwrap();

    fs::create_dir_all(outdir)?;
    fs::create_dir_all(log_dir)?;

    let log_file = std::path::Path::new(log_dir).join("pl_augustus.log");
    anno::libs::logging::init_logger(args.get_flag("verbose"), Some(log_file.as_path()))?;

    if !std::path::Path::new(assembly).exists() {
        bail!("no such file: {}", assembly);
    }
    let assembly = intspan::absolute_path(assembly)
        .unwrap()
        .display()
        .to_string();

    //----------------------------
    // Operating
    //----------------------------
    let gff3_file = std::path::Path::new(outdir).join("augustus.gff3");
    let faa_file = std::path::Path::new(outdir).join("augustus.faa");

    info!("START: Augustus");
    ToolCmd::new(augustus_bin, &gff3_file)
        .arg("--uniqueGeneId=true")
        .arg("--singlestrand=true")
        .arg("--gff3=on")
        .arg(format!("--species={}", species))
        .arg("--stopCodonExcludedFromCDS=false")
        .arg("--softmasking=1")
        .arg(&assembly)
        .run_if_needed(false)?;
    info!("DONE : Augustus");

    let lines = anno::read_lines(&gff3_file.display().to_string())?;
    let seq_of = anno::libs::augustus::extract_proteins(&lines)?;
    debug!("extracted {} protein sequences", seq_of.len());

    let mut writer = anno::writer(&faa_file.display().to_string());
    anno::libs::fasta::write_proteins(&mut writer, &seq_of)?;
    info!("proteins written to {}", faa_file.display());

    Ok(())
}
