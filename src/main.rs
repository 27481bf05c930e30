use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use millpost::config::Config;
use millpost::{init_logging, GcodeWriter};

#[derive(Parser)]
#[command(
    name = "millpost",
    about = "Generate controller-specific G-code from millpost job files",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")")
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available postprocessor dialects
    Dialects,
    /// Generate G-code from a job file
    Post {
        /// The .mpj job file to process
        job: PathBuf,
        /// Dialect to emit (defaults to the configured dialect)
        #[arg(short, long)]
        dialect: Option<String>,
        /// Output file (all-in-one) or directory (split); defaults next to
        /// the job file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write one program file per operation
        #[arg(long)]
        split: bool,
        /// Append tool-change blocks in split output
        #[arg(long)]
        tool_change: bool,
    },
}

fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let config = Config::load_or_default();

    match cli.command {
        Command::Dialects => {
            for name in millpost_post::available() {
                let post = millpost_post::create(name)?;
                println!("{name} (.{})", post.file_extension());
            }
            Ok(())
        }
        Command::Post {
            job,
            dialect,
            output,
            split,
            tool_change,
        } => post_job(&config, &job, dialect, output, split, tool_change),
    }
}

fn post_job(
    config: &Config,
    job_path: &PathBuf,
    dialect: Option<String>,
    output: Option<PathBuf>,
    split: bool,
    tool_change: bool,
) -> Result<()> {
    let dialect = dialect.unwrap_or_else(|| config.output.default_dialect.clone());
    let post = millpost_post::create(&dialect)?;
    let extension = post.file_extension();

    let job = millpost::load_job(job_path)?;
    let job_name = job.metadata.name.clone();
    let bounds = job.workpiece;
    let tools = job.tools.clone();
    let operations = job
        .into_operations()
        .with_context(|| format!("Failed to restore job: {}", job_path.display()))?;

    let mut writer = GcodeWriter::new(post);
    let split = split || config.output.split_per_operation;
    let tool_change = tool_change || config.output.tool_change_blocks;

    let base_dir = output
        .clone()
        .filter(|_| split)
        .or_else(|| config.output.output_dir.clone())
        .unwrap_or_else(|| {
            job_path
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."))
        });

    if split {
        std::fs::create_dir_all(&base_dir)
            .with_context(|| format!("Failed to create output dir: {}", base_dir.display()))?;
        let lines = writer.process_single_ops(
            &base_dir,
            &job_name,
            &bounds,
            &tools,
            &operations,
            tool_change,
        )?;
        info!(
            lines,
            dir = %base_dir.display(),
            "wrote one program per operation"
        );
    } else {
        let path = match output {
            Some(path) => path,
            None => base_dir.join(format!("{job_name}.{extension}")),
        };
        let mut out = std::io::BufWriter::new(
            std::fs::File::create(&path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        );
        let lines = writer.process_all_in_one(&mut out, &job_name, &bounds, &tools, &operations)?;
        info!(lines, file = %path.display(), "wrote job program");
    }

    Ok(())
}
