use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use letter_avatar::{
    AvatarConfig, AvatarService, AvatarServiceOpts, ImageFormat, RenderSettings, UserIdentity,
};

#[derive(Parser, Debug)]
#[command(name = "letter-avatar", version)]
struct Cli {
    /// Log debug details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an avatar to a file.
    Render(RenderArgs),
    /// Print the resolved letters, colors and shape as JSON.
    Describe(DescribeArgs),
    /// Print the sanitized options as JSON.
    Options(OptionsArgs),
}

#[derive(Args, Debug)]
struct IdentityArgs {
    /// First name.
    #[arg(long)]
    first_name: Option<String>,
    /// Last name.
    #[arg(long)]
    last_name: Option<String>,
    /// Nickname.
    #[arg(long)]
    nickname: Option<String>,
    /// Display name.
    #[arg(long)]
    display_name: Option<String>,
    /// Username.
    #[arg(long)]
    username: Option<String>,
    /// Email address.
    #[arg(long)]
    email: Option<String>,
}

impl From<IdentityArgs> for UserIdentity {
    fn from(a: IdentityArgs) -> Self {
        UserIdentity {
            first_name: a.first_name,
            last_name: a.last_name,
            nickname: a.nickname,
            display_name: a.display_name,
            username: a.username,
            email: a.email,
        }
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Raw avatar options JSON (defaults when omitted).
    #[arg(long)]
    options: Option<PathBuf>,

    #[command(flatten)]
    identity: IdentityArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Svg)]
    format: FormatChoice,

    /// Edge length in pixels.
    #[arg(long, default_value_t = 96)]
    size: u32,

    /// Extra font directory for PNG output (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct DescribeArgs {
    /// Raw avatar options JSON (defaults when omitted).
    #[arg(long)]
    options: Option<PathBuf>,

    #[command(flatten)]
    identity: IdentityArgs,
}

#[derive(Parser, Debug)]
struct OptionsArgs {
    /// Raw avatar options JSON (defaults when omitted).
    #[arg(long)]
    options: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FormatChoice {
    Svg,
    Png,
}

impl From<FormatChoice> for ImageFormat {
    fn from(f: FormatChoice) -> Self {
        match f {
            FormatChoice::Svg => ImageFormat::Svg,
            FormatChoice::Png => ImageFormat::Png,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Describe(args) => cmd_describe(args),
        Command::Options(args) => cmd_options(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AvatarConfig> {
    let Some(path) = path else {
        return Ok(AvatarConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read options '{}'", path.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parse options json '{}'", path.display()))?;
    let serde_json::Value::Object(map) = raw else {
        anyhow::bail!("options file '{}' must hold a JSON object", path.display());
    };
    Ok(AvatarConfig::from_options(&map))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = load_config(args.options.as_deref())?;
    let service = AvatarService::new(AvatarServiceOpts {
        render: RenderSettings {
            format: args.format.into(),
            size: args.size,
            font_dirs: args.font_dirs,
            ..RenderSettings::default()
        },
        cache: None,
    })?;

    let avatar = service.get_avatar(&args.identity.into(), &config)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &avatar.bytes)
        .with_context(|| format!("write avatar '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_describe(args: DescribeArgs) -> anyhow::Result<()> {
    let config = load_config(args.options.as_deref())?;
    let service = AvatarService::new(AvatarServiceOpts::default())?;
    let resolved = service.resolve(&args.identity.into(), &config)?;
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

fn cmd_options(args: OptionsArgs) -> anyhow::Result<()> {
    let config = load_config(args.options.as_deref())?;
    let options = serde_json::Value::Object(config.to_options());
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}
