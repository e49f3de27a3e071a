use std::path::PathBuf;

use clap::Args;
use signal_optimizer::parsers::{
    hashcode::HashCodeParser, parser::DatasetParser, submission::read_submission,
};
use tracing::info;

use crate::summary::print_summary;

#[derive(Args)]
pub struct ScoreArgs {
    /// Input file in the Hash Code format
    #[arg(short, long)]
    input: PathBuf,

    /// Submission to score
    #[arg(short, long)]
    submission: PathBuf,
}

pub fn run(args: ScoreArgs) -> Result<(), anyhow::Error> {
    let problem = HashCodeParser.parse(&args.input)?;
    let solution = read_submission(&problem, &args.submission)?;
    solution.validate(&problem)?;

    info!("Scoring {:?} against {:?}", args.submission, args.input);
    print_summary(&problem, &solution, None);

    Ok(())
}
