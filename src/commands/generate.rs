use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use fastrand::Rng;

use folgen::generator::PremiseGenerator;
use folgen::logic::Vocabulary;
use folgen::questions::{self, Polarity, Question, Selection};
use folgen::rules::RuleCatalogue;
use folgen::{ExerciseBundle, GenerationConfig, PremiseSet};

pub struct GenerateOptions {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub total: Option<usize>,
    pub chain: Option<usize>,
    pub derive: Option<usize>,
    pub selection: Option<String>,
    pub out: Option<PathBuf>,
    pub json: bool,
}

pub fn execute(options: GenerateOptions) -> Result<()> {
    let config = resolve_config(&options)?;
    let seed = config.generation.seed.unwrap_or_else(|| fastrand::u64(..));
    let mut rng = Rng::with_seed(seed);
    tracing::info!(seed, request = ?config.request(), "starting generation run");

    let vocabulary = Vocabulary::standard();
    let oracle = config
        .oracle
        .build()
        .context("Failed to set up decision oracle")?;
    tracing::info!(oracle = oracle.name(), "oracle ready");
    let set = PremiseGenerator::new(RuleCatalogue::standard(), &vocabulary, oracle.as_ref())
        .with_policy(config.retry)
        .generate(config.request(), &mut rng)
        .context("Failed to generate premises")?;

    let selection = config.questions.selection;
    let mut bundle = ExerciseBundle::from_premises(&set);
    let mut composed: Vec<(Question, Option<char>)> = Vec::new();

    for _ in 0..config.questions.multiple_choice {
        let mc = questions::multiple_choice(&set, selection, &mut rng)
            .context("Failed to compose multiple-choice question")?;
        composed.push((mc.question, Some(mc.correct)));
    }
    for _ in 0..config.questions.yes_no {
        let composed_yn = if set.unrelated().is_empty() {
            // Uncertain needs an unrelated premise to ask about
            let polarity = [Polarity::Yes, Polarity::No][rng.usize(..2)];
            questions::yes_no_with(&set, polarity, selection, &mut rng)
        } else {
            questions::yes_no(&set, selection, &mut rng)
        };
        let yn = composed_yn.context("Failed to compose yes/no question")?;
        composed.push((yn.question, None));
    }

    for (question, _) in &composed {
        bundle.push(question);
    }

    if let Some(path) = &options.out {
        bundle
            .write(path)
            .with_context(|| format!("Failed to write bundle to {}", path.display()))?;
    }

    if options.json {
        println!("{}", bundle.to_json()?);
    } else {
        print_premises(&set, seed);
        print_questions(&composed);
        if let Some(path) = &options.out {
            println!("\n{} {}", "✓".green(), format!("Wrote {}", path.display()).dimmed());
        }
    }

    Ok(())
}

/// Config file (or defaults) with command-line overrides applied
fn resolve_config(options: &GenerateOptions) -> Result<GenerationConfig> {
    let mut config = match &options.config {
        Some(path) => GenerationConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GenerationConfig::default(),
    };

    if let Some(seed) = options.seed {
        config.generation.seed = Some(seed);
    }
    if let Some(total) = options.total {
        config.generation.total_count = total;
    }
    if let Some(chain) = options.chain {
        config.generation.chain_count = chain;
    }
    if let Some(derive) = options.derive {
        config.generation.derive_count = derive;
    }
    if let Some(selection) = &options.selection {
        config.questions.selection = selection.parse::<Selection>()?;
    }

    config.validate()?;
    Ok(config)
}

fn print_premises(set: &PremiseSet, seed: u64) {
    println!("{} {}", "Premises".bold(), format!("(seed {seed})").dimmed());
    for (index, premise) in set.ordered().iter().enumerate() {
        println!(
            "  Premise {}: {} -> {}",
            index,
            premise.label.to_string().cyan(),
            premise.formula
        );
    }
}

fn print_questions(composed: &[(Question, Option<char>)]) {
    for (number, (question, letter)) in composed.iter().enumerate() {
        println!("\n{}", format!("Question {}", number + 1).bold());
        for line in question.prompt.lines() {
            println!("  {line}");
        }

        let answer = match letter {
            Some(letter) => format!("{}. {}", letter, question.answer),
            None => question.answer.clone(),
        };
        println!("  {} {}", "Answer:".green(), answer);

        let used = if question.indices.is_empty() {
            "none".to_string()
        } else {
            question
                .indices
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("  {} {}", "Premises used:".dimmed(), used);
    }
}
