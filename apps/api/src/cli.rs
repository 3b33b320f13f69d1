//! Command-line entry points besides the HTTP server.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::fetcher::bulk::{parse_url_list, PageFetcher};
use crate::tailoring::pipeline::tailor_resume;
use crate::tailoring::skills::{analyze_resume_text, SkillsAnalysis};

#[derive(Parser, Debug)]
#[command(name = "jobgenie")]
#[command(version, about = "Résumé tailoring and job-posting scraper")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve,

    /// Download every URL in a .txt/.csv list and save the page text
    Scrape {
        /// File with one URL per line
        url_file: PathBuf,

        /// Where to write the text files (defaults to SCRAPE_OUTPUT_DIR)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Print a résumé tailored to a job description
    Tailor {
        #[arg(long)]
        resume: PathBuf,

        #[arg(long)]
        job: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List skills a job description asks for that the résumé lacks, with certifications
    Skills {
        #[arg(long)]
        resume: PathBuf,

        #[arg(long)]
        job: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Markdown,
}

pub async fn run_scrape(config: &Config, url_file: &Path, output_dir: Option<PathBuf>) -> Result<()> {
    let contents = tokio::fs::read_to_string(url_file)
        .await
        .with_context(|| format!("Failed to read URL file {}", url_file.display()))?;
    let is_csv = url_file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let urls = parse_url_list(&contents, is_csv)?;
    println!("Found {} URLs in {}", urls.len(), url_file.display());

    let output_dir = output_dir.unwrap_or_else(|| config.scrape_output_dir.clone());
    let fetcher = PageFetcher::new(&config.fetch)?;
    let summary = fetcher.fetch_all(&urls, &output_dir).await?;

    for result in &summary.results {
        match (&result.filename, &result.error) {
            (Some(filename), _) => println!("  ok    {} -> {filename}", result.url),
            (None, Some(error)) => println!("  FAIL  {}: {error}", result.url),
            (None, None) => println!("  FAIL  {}", result.url),
        }
    }

    println!("\nDownload Summary:");
    println!("Total URLs: {}", summary.total);
    println!("Successfully downloaded: {}", summary.success);
    println!("Failed: {}", summary.failed);
    println!("Downloaded content saved to: {}", summary.output_dir);
    Ok(())
}

pub async fn run_tailor(resume: &Path, job: &Path, format: OutputFormat) -> Result<()> {
    let resume_text = tokio::fs::read_to_string(resume)
        .await
        .with_context(|| format!("Failed to read résumé {}", resume.display()))?;
    let job_text = tokio::fs::read_to_string(job)
        .await
        .with_context(|| format!("Failed to read job description {}", job.display()))?;

    let tailored = tailor_resume(&resume_text, &job_text)?;
    match format {
        OutputFormat::Text => println!("{}", tailored.text),
        OutputFormat::Markdown => println!("{}", tailored.markdown),
    }
    Ok(())
}

pub async fn run_skills(resume: &Path, job: &Path) -> Result<()> {
    let resume_text = tokio::fs::read_to_string(resume)
        .await
        .with_context(|| format!("Failed to read résumé {}", resume.display()))?;
    let job_text = tokio::fs::read_to_string(job)
        .await
        .with_context(|| format!("Failed to read job description {}", job.display()))?;

    print!("{}", format_skills_report(&analyze_resume_text(&resume_text, &job_text)));
    Ok(())
}

fn format_skills_report(analysis: &SkillsAnalysis) -> String {
    let mut out = String::new();
    let mut list = |title: String, items: &[String]| {
        out.push_str(&title);
        out.push('\n');
        for item in items {
            out.push_str(&format!("  • {item}\n"));
        }
    };

    list(
        format!("Skills found in résumé ({}):", analysis.resume_skills.len()),
        &analysis.resume_skills,
    );
    list(
        format!("\nSkills in job description ({}):", analysis.job_skills.len()),
        &analysis.job_skills,
    );
    list(
        format!("\nMissing skills ({}):", analysis.missing_skills.len()),
        &analysis.missing_skills,
    );
    if analysis.missing_skills.is_empty() {
        out.push_str("  None. The résumé covers every skill the job description mentions.\n");
    }

    out.push_str("\nCertification recommendations:\n");
    if analysis.certifications.is_empty() {
        out.push_str("  No specific certifications for the missing skills.\n");
    }
    for entry in &analysis.certifications {
        out.push_str(&format!("\nFor {}:\n", entry.skill));
        for cert in entry.certifications {
            out.push_str(&format!(
                "  • {}\n    Provider: {}\n    URL: {}\n",
                cert.name, cert.provider, cert.url
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["jobgenie"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_scrape_arguments() {
        let cli = Cli::try_parse_from(["jobgenie", "scrape", "urls.txt", "-o", "out"]).unwrap();
        match cli.command {
            Some(Command::Scrape {
                url_file,
                output_dir,
            }) => {
                assert_eq!(url_file, PathBuf::from("urls.txt"));
                assert_eq!(output_dir, Some(PathBuf::from("out")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_tailor_format_defaults_to_text() {
        let cli =
            Cli::try_parse_from(["jobgenie", "tailor", "--resume", "r.txt", "--job", "j.txt"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Tailor {
                format: OutputFormat::Text,
                ..
            })
        ));
    }

    #[test]
    fn test_skills_arguments() {
        let cli = Cli::try_parse_from(["jobgenie", "skills", "--resume", "r.txt", "--job", "j.txt"])
            .unwrap();
        assert!(matches!(cli.command, Some(Command::Skills { .. })));
    }

    #[test]
    fn test_skills_report_lists_missing_and_certifications() {
        let analysis = analyze_resume_text("Rust and Python", "Rust, Python, AWS");
        let report = format_skills_report(&analysis);
        assert!(report.contains("Missing skills (1):\n  • AWS"));
        assert!(report.contains("For AWS:"));
        assert!(report.contains("Provider: Amazon"));
    }

    #[tokio::test]
    async fn test_run_skills_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let resume = dir.path().join("resume.txt");
        let job = dir.path().join("job.txt");
        std::fs::write(&resume, "Rust services").unwrap();
        std::fs::write(&job, "Rust and Docker").unwrap();

        run_skills(&resume, &job).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_tailor_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let resume = dir.path().join("resume.txt");
        let job = dir.path().join("job.txt");
        std::fs::write(&resume, "Rust services\n\nPottery").unwrap();
        std::fs::write(&job, "Rust services engineer").unwrap();

        run_tailor(&resume, &job, OutputFormat::Markdown).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_tailor_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_tailor(
            &dir.path().join("missing.txt"),
            &dir.path().join("job.txt"),
            OutputFormat::Text,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read résumé"));
    }
}
