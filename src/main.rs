use clap::{Parser, Subcommand};
use color_eyre::{eyre::eyre, Result};
use serde::Serialize;
use std::path::PathBuf;

use showcase::http::JsonClient;
use showcase::{logging, Config, ContentClient, FetchError, TestimonialsClient};

#[derive(Parser, Debug)]
#[command(name = "showcase")]
#[command(about = "Fetch and normalize portfolio projects and testimonials")]
#[command(version)]
struct Args {
  /// Path to config file (default: ./showcase.yaml or $XDG_CONFIG_HOME/showcase/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Write logs to daily-rolled files in this directory instead of stderr
  #[arg(long)]
  log_dir: Option<PathBuf>,

  /// Increase log verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List projects, optionally limited to one category label
  Projects {
    #[arg(long)]
    category: Option<String>,
  },
  /// Show a single project by id
  Project { id: String },
  /// List distinct project categories
  Categories,
  /// List testimonials
  Testimonials,
  /// Projects, categories and testimonials in one document
  Overview,
}

#[derive(Serialize)]
struct Overview {
  projects: Section<Vec<showcase::Project>>,
  categories: Section<Vec<String>>,
  testimonials: Section<Vec<showcase::Testimonial>>,
}

/// Either the data or the error that replaced it.
#[derive(Serialize)]
#[serde(untagged)]
enum Section<T> {
  Ready(T),
  Failed {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
  },
}

impl<T> From<Result<T, FetchError>> for Section<T> {
  fn from(result: Result<T, FetchError>) -> Self {
    match result {
      Ok(data) => Section::Ready(data),
      Err(e) => Section::Failed {
        status: e.status(),
        error: e.to_string(),
      },
    }
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();
  let _guard = logging::init(args.verbose, args.log_dir.as_deref())?;

  // Load configuration
  let config = Config::load(args.config.as_deref())?;
  let http = JsonClient::new()?;

  match args.command {
    Command::Projects { category } => {
      let mut content = ContentClient::new(&config, http)?;
      let projects = match category {
        Some(c) => content.projects_in(&c).await,
        None => content.projects().await,
      };
      print_json(&projects?)
    }
    Command::Project { id } => {
      let mut content = ContentClient::new(&config, http)?;
      let project = content
        .project_by_id(&id)
        .await?
        .ok_or_else(|| eyre!("No project with id {}", id))?;
      print_json(&project)
    }
    Command::Categories => {
      let mut content = ContentClient::new(&config, http)?;
      print_json(&content.categories().await?)
    }
    Command::Testimonials => {
      let mut testimonials = TestimonialsClient::new(&config, http)?;
      print_json(&testimonials.testimonials().await?)
    }
    Command::Overview => {
      let mut content = ContentClient::new(&config, http.clone())?;
      let mut reviews = TestimonialsClient::new(&config, http)?;

      // The two backends are independent
      let (catalog, testimonials) = tokio::join!(
        content.projects_with_categories(),
        reviews.testimonials()
      );
      let (projects, categories) = match catalog {
        Ok((projects, categories)) => (Ok(projects), Ok(categories)),
        Err(e) => (Err(e.clone()), Err(e)),
      };

      print_json(&Overview {
        projects: projects.into(),
        categories: categories.into(),
        testimonials: testimonials.into(),
      })
    }
  }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
