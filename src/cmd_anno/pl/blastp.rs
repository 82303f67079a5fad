use anyhow::bail;
use clap::*;
use log::{debug, info};
use std::fs;
use std::path::Path;

use anno::libs::invoke::ToolCmd;

const EVALUE_CUTOFF: &str = "1e-5";

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("blastp")
        .about("Pipeline - BLASTp protein similarity search")
        .after_help(
            r###"
Searches a protein query set against a protein database with NCBI BLAST+.

* The pl-* subcommands
    * The default --outdir is `PL-*`, not `.`
    * There is no option to output to the screen

Stages:
1. makeblastdb -in <db.fa> -dbtype prot
   Skipped when the index (<db.fa>.phr or <db.fa>.00.phr) already exists.
   Tool output goes to <log-dir>/makeblastdb.log.
2. blastp -outfmt "6 qseqid sseqid length qlen slen bitscore"
          -query <query.fa> -db <db.fa> -out <outdir>/<query>.blastp.tsv
          -num_threads <N> -evalue 1e-5
   Skipped when the output exists and is non-empty; a zero-byte artifact is
   treated as not yet produced. Tool output goes to <log-dir>/blastp.log.

`--num-cores` is handed to `blastp -num_threads`; the pipeline itself runs
single-threaded.

Examples:
1. Search predicted proteins against a reference database:
   anno pl blastp augustus.faa swissprot.fa

2. Eight blastp threads, custom output location:
   anno pl blastp augustus.faa swissprot.fa -c 8 -o PL-blastp

"###,
        )
        .arg(
            Arg::new("query")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Query protein FASTA file"),
        )
        .arg(
            Arg::new("db")
                .required(true)
                .num_args(1)
                .index(2)
                .help("Database protein FASTA file"),
        )
        .arg(
            Arg::new("outdir")
                .long("outdir")
                .short('o')
                .num_args(1)
                .default_value("PL-blastp")
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
            Arg::new("num_cores")
                .long("num-cores")
                .short('c')
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Number of threads handed to blastp"),
        )
        .arg(
            Arg::new("makeblastdb_bin")
                .long("makeblastdb-bin")
                .num_args(1)
                .default_value("makeblastdb")
                .help("Path to the makeblastdb executable"),
        )
        .arg(
            Arg::new("blastp_bin")
                .long("blastp-bin")
                .num_args(1)
                .default_value("blastp")
                .help("Path to the blastp executable"),
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
    let query = args.get_one::<String>("query").unwrap();
    let db = args.get_one::<String>("db").unwrap();
    let outdir = args.get_one::<String>("outdir").unwrap();
    let log_dir = args.get_one::<String>("log_dir").unwrap();
    let num_cores = *args.get_one::<usize>("num_cores").unwrap();
    let makeblastdb_bin = args.get_one::<String>("makeblastdb_bin").unwrap();
    let blastp_bin = args.get_one::<String>("blastp_bin").unwrap();

    fs::create_dir_all(outdir)?;
    fs::create_dir_all(log_dir)?;

    let log_file = Path::new(log_dir).join("pl_blastp.log");
    anno::libs::logging::init_logger(args.get_flag("verbose"), Some(log_file.as_path()))?;

    if !Path::new(query).exists() {
        bail!("no such file: {}", query);
    }
    if !Path::new(db).exists() {
        bail!("no such file: {}", db);
    }

    let query_base = intspan::basename(query)?;
    let query = intspan::absolute_path(query).unwrap().display().to_string();
    let db = intspan::absolute_path(db).unwrap().display().to_string();

    //----------------------------
    // Operating
    //----------------------------
    debug!("query contains {} sequences", count_fa_records(&query)?);

    info!("START: BLASTp");

    // makeblastdb leaves its index volumes next to the database file
    let index_done = [format!("{}.phr", db), format!("{}.00.phr", db)]
        .iter()
        .any(|index| Path::new(index).exists());
    if index_done {
        debug!("[Note] Running makeblastdb has already been finished");
    } else {
        ToolCmd::new(makeblastdb_bin, Path::new(&format!("{}.phr", db)))
            .arg("-in")
            .arg(&db)
            .arg("-dbtype")
            .arg("prot")
            .log_to(&Path::new(log_dir).join("makeblastdb.log"))
            .run()?;
    }

    let blastp_out = Path::new(outdir).join(format!("{}.blastp.tsv", query_base));
    ToolCmd::new(blastp_bin, &blastp_out)
        .arg("-outfmt")
        .arg("6 qseqid sseqid length qlen slen bitscore")
        .arg("-query")
        .arg(&query)
        .arg("-db")
        .arg(&db)
        .arg("-out")
        .arg(blastp_out.display().to_string())
        .arg("-num_threads")
        .arg(num_cores.to_string())
        .arg("-evalue")
        .arg(EVALUE_CUTOFF)
        .log_to(&Path::new(log_dir).join("blastp.log"))
        .run_if_needed(true)?;

    info!("DONE : BLASTp");

    Ok(())
}

fn count_fa_records(input: &str) -> anyhow::Result<usize> {
    let reader = anno::reader(input);
    let mut fa_in = noodles_fasta::io::Reader::new(reader);

    let mut count = 0;
    for result in fa_in.records() {
        let _ = result?;
        count += 1;
    }

    Ok(count)
}
