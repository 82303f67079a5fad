use clap::*;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("prot")
        .about("Extract protein sequences from AUGUSTUS GFF3")
        .after_help(
            r###"
This command reconstructs the per-transcript protein sequences that AUGUSTUS
embeds as bracketed comment blocks in its GFF3 output, and writes them as
FASTA wrapped at 60 columns.

Entries are sorted by the numeric gene index of the transcript identifier
(`g1` before `g2` before `g10`), not lexicographically.

Notes:
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'
* BRAKER1 evidence/statistics comment lines are ignored
* An identifier without a trailing `g<N>.t<M>` component is an error

Examples:
1. Extract proteins to the screen:
   anno gff prot augustus.gff3

2. Save the output to a file:
   anno gff prot augustus.gff3 -o augustus.faa

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input AUGUSTUS GFF3 file. [stdin] for standard input"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let mut writer = anno::writer(args.get_one::<String>("outfile").unwrap());

    //----------------------------
    // Ops
    //----------------------------
    let lines = anno::read_lines(infile)?;
    let seq_of = anno::libs::augustus::extract_proteins(&lines)?;

    //----------------------------
    // Output
    //----------------------------
    anno::libs::fasta::write_proteins(&mut writer, &seq_of)?;

    Ok(())
}
