extern crate clap;
use clap::*;

mod cmd_msamap;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .init();

    let app = Command::new("msamap")
        .version(crate_version!())
        .about("`msamap` - coordinate mapping for protein MSAs")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_msamap::align::make_subcommand())
        .subcommand(cmd_msamap::lift::make_subcommand())
        .after_help(
            r###"Subcommands:

* align - Global pairwise alignment of two protein sequences
* lift  - Map MSA columns of a query row to genomic intervals

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("align", sub_matches)) => cmd_msamap::align::execute(sub_matches),
        Some(("lift", sub_matches)) => cmd_msamap::lift::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
