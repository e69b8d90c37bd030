use anyhow::anyhow;
use clap::*;
use msamap::libs::align;
use msamap::libs::msa::Msa;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("align")
        .about("Global pairwise alignment of two protein sequences")
        .after_help(
            r###"
Align the first two records of a FASTA file end to end (BLOSUM62, affine
gaps) and print the gapped rows with a consensus line.

Gap characters in the input are stripped before aligning, so already-aligned
rows can be fed back in.

Examples:
1. Align two sequences:
   msamap align pair.fa

2. Write the result to a file:
   msamap align pair.fa -o aln.txt
"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input FASTA file. [stdin] for standard input"),
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

    let msa = Msa::from_fasta(infile)?;
    let (name1, seq1) = msa
        .row(0)
        .ok_or_else(|| anyhow!("{} holds no FASTA records", infile))?;
    let (name2, seq2) = msa
        .row(1)
        .ok_or_else(|| anyhow!("{} holds fewer than two FASTA records", infile))?;

    let ungapped1: String = seq1.chars().filter(|c| *c != '-').collect();
    let ungapped2: String = seq2.chars().filter(|c| *c != '-').collect();

    let result = align::align(&ungapped1, &ungapped2);
    let consensus = align::consensus(&result.aligned1, &result.aligned2);

    writer.write_fmt(format_args!("{:<12} {}\n", name1, result.aligned1))?;
    writer.write_fmt(format_args!("{:<12} {}\n", "", consensus))?;
    writer.write_fmt(format_args!("{:<12} {}\n", name2, result.aligned2))?;
    writer.write_fmt(format_args!("{:<12} {:.1}\n", "score", result.score))?;

    Ok(())
}
