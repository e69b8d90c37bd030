use anyhow::{anyhow, Context};
use clap::*;
use msamap::libs::genome::{msa_column_to_genome_interval, TranscriptToGenomeMap};
use msamap::libs::msa::Msa;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("lift")
        .about("Map MSA columns of a query row to genomic intervals")
        .after_help(
            r###"
Convert gapped columns of one MSA row into genomic intervals through a
transcript's protein-to-genome table.

The p2g file is tab-separated: one `ref_name <name>` line, then
`position <coordinate>` pairs (0-based ungapped protein positions).

Columns are 0-based. A column that lands on a gap, runs past the row, or
lacks a table entry prints `.`.

Examples:
1. Map three columns of row P12345:
   msamap lift msa.fa p2g.tsv --row P12345 --columns 0,2,5
"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input MSA in FASTA format. [stdin] for standard input"),
        )
        .arg(
            Arg::new("p2g")
                .required(true)
                .num_args(1)
                .index(2)
                .help("Protein-to-genome table (TSV)"),
        )
        .arg(
            Arg::new("row")
                .long("row")
                .required(true)
                .num_args(1)
                .help("Name of the query row"),
        )
        .arg(
            Arg::new("columns")
                .long("columns")
                .required(true)
                .num_args(1)
                .help("Comma-separated gapped column indices"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = msamap::writer(args.get_one::<String>("outfile").unwrap())?;
    let infile = args.get_one::<String>("infile").unwrap();
    let row_name = args.get_one::<String>("row").unwrap();

    let msa = Msa::from_fasta(infile)?;
    msa.validate()?;
    let row_seq = msa
        .get(row_name)
        .ok_or_else(|| anyhow!("row {} not found in {}", row_name, infile))?
        .to_string();

    let map = TranscriptToGenomeMap::from_tsv(msamap::reader(
        args.get_one::<String>("p2g").unwrap(),
    )?)?;

    let mut columns = Vec::new();
    for part in args.get_one::<String>("columns").unwrap().split(',') {
        let column: usize = part
            .trim()
            .parse()
            .with_context(|| format!("bad column index: {}", part))?;
        columns.push(column);
    }

    for column in columns {
        match msa_column_to_genome_interval(&row_seq, &map, column) {
            Some(interval) => writer.write_fmt(format_args!("{}\n", interval))?,
            None => writer.write_fmt(format_args!(".\n"))?,
        }
    }

    Ok(())
}
