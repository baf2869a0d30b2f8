use std::error::Error;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use voca_client::{
    ApiConfig, Category, Difficulty, FormsQuery, PosCategory, QueryParams, SearchResponse,
    SharedCookieJar, VocaApi, base_word_type, build_query_string, no_results, specific_word_type,
};

#[derive(Parser, Debug)]
#[command(name = "voca", about = "Query the Voca word-search API", version)]
pub struct Cli {
    /// Emit JSON instead of human-readable tables.
    #[arg(long, global = true)]
    json: bool,

    /// Named configuration to use (development or production).
    #[arg(long = "env", env = "VOCA_ENV", global = true)]
    environment: Option<String>,

    /// Override the API base URL.
    #[arg(long, env = "VOCA_API_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Cookies to send, in `Cookie` header form (`csrftoken=..; sessionid=..`).
    #[arg(long, env = "VOCA_COOKIE", global = true)]
    cookie: Option<String>,

    /// CSRF token; takes precedence over a `csrftoken` in `--cookie`.
    #[arg(long, env = "VOCA_CSRF_TOKEN", global = true)]
    csrf_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the API version and whether the session is authenticated.
    Status,
    /// Example sentences for a word and its inflected forms.
    Forms(SearchArgs),
    /// Example sentences for a word.
    Sentences(SearchArgs),
    /// Show a single sentence by ID.
    Show {
        id: String,
    },
    /// Report a sentence as incorrect or offensive.
    Report {
        id: String,
    },
    /// Translate POS tags into readable categories.
    Pos {
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Split word-type labels such as "Verb (past)".
    WordType {
        #[arg(required = true)]
        labels: Vec<String>,
    },
    /// Encode `key=value` pairs as a query string.
    Query {
        #[arg(required = true)]
        pairs: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// ISO language code (de, en, es, fr).
    language: String,
    word: String,
    /// Include inflected forms of the word.
    #[arg(long)]
    inflect: bool,
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,
    #[arg(long, value_enum)]
    category: Option<CategoryArg>,
}

impl SearchArgs {
    fn query(&self) -> FormsQuery {
        FormsQuery {
            inflect: self.inflect,
            difficulty: self.difficulty.map(Difficulty::from),
            category: self.category.map(Category::from),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DifficultyArg {
    Easy,
    Moderate,
    Difficult,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Moderate => Difficulty::Moderate,
            DifficultyArg::Difficult => Difficulty::Difficult,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CategoryArg {
    News,
    Web,
    Kids,
}

impl From<CategoryArg> for Category {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::News => Category::News,
            CategoryArg::Web => Category::Web,
            CategoryArg::Kids => Category::Kids,
        }
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match &cli.command {
        Command::Pos { tags } => handle_pos(tags, cli.json),
        Command::WordType { labels } => handle_word_type(labels, cli.json),
        Command::Query { pairs } => handle_query(pairs, cli.json),
        _ => {
            let api = build_api(&cli)?;
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_remote(&api, &cli))
        }
    }
}

fn build_api(cli: &Cli) -> Result<VocaApi, Box<dyn Error>> {
    let config = ApiConfig::from_values(cli.environment.as_deref(), cli.base_url.as_deref())?;
    let jar = cli
        .cookie
        .as_deref()
        .map(SharedCookieJar::from_header)
        .unwrap_or_default();
    if let Some(token) = &cli.csrf_token {
        jar.set_csrf_token(token.clone());
    }
    Ok(VocaApi::new(config, jar)?)
}

async fn run_remote(api: &VocaApi, cli: &Cli) -> Result<(), Box<dyn Error>> {
    match &cli.command {
        Command::Status => {
            let status = api.status().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("API version: {}", status.version);
                println!("Authenticated: {}", status.is_authenticated);
            }
        }
        Command::Forms(args) => {
            let response = api
                .sentence_forms(&args.language, &args.word, &args.query())
                .await?;
            print_search(&args.word, &response, cli.json)?;
        }
        Command::Sentences(args) => {
            let response = api
                .sentence_list(&args.language, &args.word, &args.query())
                .await?;
            print_search(&args.word, &response, cli.json)?;
        }
        Command::Show { id } => {
            let detail = api.sentence(id).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                println!("{}", detail.content);
                println!(
                    "[{} / {}] {} words, avg length {:.2}, {} reports",
                    detail.language,
                    detail.category,
                    detail.sentence_length,
                    detail.avg_word_length,
                    detail.reports
                );
            }
        }
        Command::Report { id } => {
            api.report_sentence(id).await?;
            if cli.json {
                println!("{}", json!({ "reported": id }));
            } else {
                println!("Reported sentence {id}.");
            }
        }
        Command::Pos { .. } | Command::WordType { .. } | Command::Query { .. } => {}
    }
    Ok(())
}

fn print_search(word: &str, response: &SearchResponse, as_json: bool) -> Result<(), Box<dyn Error>> {
    if as_json {
        let groups = response
            .sentences
            .iter()
            .map(|group| {
                json!({
                    "word": group.word,
                    "pos": group.pos,
                    "word_type": group.pos_category().label(),
                    "sentences": group.sentences,
                })
            })
            .collect::<Vec<_>>();
        let payload = json!({
            "word": word,
            "forms": response.forms,
            "no_results": no_results(response),
            "groups": groups,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if no_results(response) {
        println!("No sentences found for \"{word}\".");
        return Ok(());
    }
    if !response.forms.is_empty() {
        println!("Forms: {}", response.forms.join(", "));
    }
    for group in &response.sentences {
        if group.sentences.is_empty() {
            continue;
        }
        let category = group.pos_category();
        println!("\n{} ({})", group.word, describe_category(category));
        for sentence in &group.sentences {
            let origin = match (&sentence.category, &sentence.source) {
                (Some(category), Some(source)) => format!(" [{category}, {source}]"),
                (Some(category), None) => format!(" [{category}]"),
                (None, Some(source)) => format!(" [{source}]"),
                (None, None) => String::new(),
            };
            println!("- {}{}", sentence.sentence, origin);
        }
    }
    Ok(())
}

fn describe_category(category: PosCategory) -> String {
    let label = category.label();
    let specific = specific_word_type(label);
    if specific == label {
        label.to_string()
    } else {
        format!("{}, {}", base_word_type(label), specific)
    }
}

fn handle_pos(tags: &[String], as_json: bool) -> Result<(), Box<dyn Error>> {
    let rows: Vec<(&str, PosCategory)> = tags
        .iter()
        .map(|tag| (tag.as_str(), PosCategory::from_tag(tag)))
        .collect();
    if as_json {
        let payload: Vec<_> = rows
            .iter()
            .map(|(tag, category)| json!({ "tag": tag, "category": category, "label": category.label() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }
    let width = rows
        .iter()
        .map(|(tag, _)| tag.len())
        .max()
        .unwrap_or(3)
        .max("TAG".len());
    println!("{:<width$}  {}", "TAG", "WORD_TYPE", width = width);
    println!("{:-<width$}  {}", "", "---------", width = width);
    for (tag, category) in rows {
        println!("{:<width$}  {}", tag, category, width = width);
    }
    Ok(())
}

fn handle_word_type(labels: &[String], as_json: bool) -> Result<(), Box<dyn Error>> {
    if as_json {
        let payload: Vec<_> = labels
            .iter()
            .map(|label| {
                json!({
                    "label": label,
                    "base": base_word_type(label),
                    "specific": specific_word_type(label),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }
    let width = labels
        .iter()
        .map(|label| label.len())
        .max()
        .unwrap_or(5)
        .max("LABEL".len());
    println!("{:<width$}  {}", "LABEL", "SPECIFIC", width = width);
    println!("{:-<width$}  {}", "", "--------", width = width);
    for label in labels {
        println!("{:<width$}  {}", label, specific_word_type(label), width = width);
    }
    Ok(())
}

fn handle_query(pairs: &[String], as_json: bool) -> Result<(), Box<dyn Error>> {
    let mut params = QueryParams::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("Expected key=value, got {pair:?}"))?;
        if key.is_empty() {
            return Err(format!("Empty parameter name in {pair:?}").into());
        }
        params.insert(key, value);
    }
    let rendered = build_query_string(Some(&params));
    if as_json {
        println!("{}", json!({ "query": rendered }));
    } else {
        println!("{rendered}");
    }
    Ok(())
}
