mod args;

use anyhow::{Context, Result, bail};
use args::{Cli, Commands};
use clap::Parser;
use lessonmark_config::Config;
use lessonmark_engine::{
    AssetResolver, CompileError, CompileOptions, CompiledDocument, LessonRef, compile_all,
    compile_document, io, render,
};
use std::{fs, path::Path, process};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let options = compile_options(&config);

    let ok = match &cli.command {
        Commands::Compile { file, json } => compile_file(file, *json, &options)?,
        Commands::Lesson {
            subject,
            number,
            json,
        } => {
            let lesson = LessonRef::new(subject.as_str(), *number)?;
            compile_lesson(&config, &lesson, *json, &options)?
        }
        Commands::Build => build(&config, &options, true)?,
        Commands::Check => build(&config, &options, false)?,
    };

    if !ok {
        process::exit(1);
    }
    Ok(())
}

/// Config file (explicit path or the default location) with command-line
/// overrides applied. A missing default config means built-in defaults.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let Some(config) = Config::load_from_path(path)? else {
                bail!("config file '{}' not found", path.display());
            };
            log::info!("Config path: {}", path.display());
            config
        }
        None => Config::load()?.unwrap_or_else(|| {
            log::debug!(
                "no config file at {}, using defaults",
                Config::config_path().display()
            );
            Config::default()
        }),
    };

    if let Some(content) = &cli.content {
        config.content_root = content.clone();
    }
    if let Some(output) = &cli.output {
        config.output_dir = output.clone();
    }
    Ok(config)
}

fn compile_options(config: &Config) -> CompileOptions {
    let mut options = CompileOptions {
        assets: AssetResolver::new(config.asset_base_url.clone()),
        ..CompileOptions::default()
    };
    if let Some(placeholders) = &config.placeholder_images {
        options.placeholder_images = placeholders.clone();
    }
    options
}

fn compile_file(file: &Path, json: bool, options: &CompileOptions) -> Result<bool> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("failed to read '{}'", file.display()))?;
    print_compiled(
        &file.display().to_string(),
        compile_document(&source, options),
        json,
    )
}

fn compile_lesson(
    config: &Config,
    lesson: &LessonRef,
    json: bool,
    options: &CompileOptions,
) -> Result<bool> {
    let source = io::read_lesson(&config.content_root, lesson)?;
    print_compiled(&lesson.to_string(), compile_document(&source, options), json)
}

/// Prints a compiled document, or its failure page. Returns whether it
/// compiled.
fn print_compiled(
    name: &str,
    result: Result<CompiledDocument, CompileError>,
    json: bool,
) -> Result<bool> {
    match result {
        Ok(doc) if json => {
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(true)
        }
        Ok(doc) => {
            print!("{}", render::render_document(&doc));
            Ok(true)
        }
        Err(e) if json => {
            log::error!("{name}: {e}");
            Ok(false)
        }
        Err(e) => {
            log::error!("{name}: {e}");
            print!("{}", render::render_failure(name, &e));
            Ok(false)
        }
    }
}

/// Compiles every lesson under the content root in parallel. With `write`,
/// each lesson becomes `<output_dir>/<subject>/<number>.html`, and lessons
/// that fail get the failure page instead. Returns whether all compiled.
fn build(config: &Config, options: &CompileOptions, write: bool) -> Result<bool> {
    let lessons = io::scan_lessons(&config.content_root).with_context(|| {
        format!(
            "cannot list lessons in '{}'",
            config.content_root.display()
        )
    })?;
    log::info!(
        "compiling {} lessons from {}",
        lessons.len(),
        config.content_root.display()
    );

    let total = lessons.len();
    let mut failed = 0usize;
    let mut sources = Vec::with_capacity(total);
    for lesson in lessons {
        match io::read_lesson(&config.content_root, &lesson) {
            Ok(source) => sources.push((lesson, source)),
            Err(e) => {
                log::error!("{lesson}: {e}");
                failed += 1;
            }
        }
    }

    let texts: Vec<&str> = sources.iter().map(|(_, s)| s.as_str()).collect();
    let results = compile_all(&texts, options);

    for ((lesson, _), result) in sources.iter().zip(results) {
        let html = match result {
            Ok(doc) => {
                log::debug!("{lesson}: ok");
                render::render_document(&doc)
            }
            Err(e) => {
                log::error!("{lesson}: {e}");
                failed += 1;
                render::render_failure(&lesson.to_string(), &e)
            }
        };
        if write {
            io::write_file(&lesson.with_extension("html"), &config.output_dir, &html)
                .with_context(|| format!("failed to write output for {lesson}"))?;
        }
    }

    if write {
        log::info!(
            "wrote {} pages to {}",
            sources.len(),
            config.output_dir.display()
        );
    }
    if failed > 0 {
        log::warn!("{failed} of {total} lessons failed");
    }
    Ok(failed == 0)
}
