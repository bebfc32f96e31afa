//! Summary generation
//!
//! Renders a short natural-language explanation from the strongest
//! contributing factors. Purely presentational: it only reads signals and
//! probabilities that are already computed.

use crate::engine::aggregator::{Contribution, OutcomeProbabilities};
use crate::engine::confidence::Confidence;
use crate::factors::{Category, CategorySignal};
use crate::types::FixtureContext;

const MAX_FACTS: usize = 3;
const MIN_CONTRIBUTION: f64 = 0.015;

pub fn render(
    ctx: &FixtureContext,
    probabilities: &OutcomeProbabilities,
    confidence: &Confidence,
    completeness_pct: f64,
    contributions: &[Contribution],
    signals: &[CategorySignal],
) -> String {
    let mut sentences = vec![headline(ctx, probabilities)];

    let mut ranked: Vec<&Contribution> = contributions
        .iter()
        .filter(|c| c.contribution.abs() >= MIN_CONTRIBUTION)
        .collect();
    ranked.sort_by(|a, b| {
        b.contribution
            .abs()
            .partial_cmp(&a.contribution.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for contribution in ranked.into_iter().take(MAX_FACTS) {
        let note = signals
            .iter()
            .find(|s| s.category == contribution.category)
            .and_then(|s| s.note());
        if let Some(sentence) = factor_sentence(ctx, contribution, note) {
            sentences.push(sentence);
        }
    }

    sentences.push(format!(
        "Confidence is {} ({:.0}/100) on {:.0}% data coverage.",
        confidence.level, confidence.score, completeness_pct
    ));

    sentences.join(" ")
}

fn headline(ctx: &FixtureContext, p: &OutcomeProbabilities) -> String {
    if p.draw >= p.home && p.draw >= p.away {
        format!("A draw looks most likely ({:.0}%).", p.draw)
    } else if p.home >= p.away {
        format!("{} to win ({:.0}%).", ctx.home_team, p.home)
    } else {
        format!("{} to win ({:.0}%).", ctx.away_team, p.away)
    }
}

fn factor_sentence(
    ctx: &FixtureContext,
    contribution: &Contribution,
    note: Option<&str>,
) -> Option<String> {
    let favored = if contribution.tilt >= 0.0 {
        &ctx.home_team
    } else {
        &ctx.away_team
    };
    let hurt = if contribution.tilt >= 0.0 {
        &ctx.away_team
    } else {
        &ctx.home_team
    };

    let body = match contribution.category {
        Category::Form => format!("Recent form favours {favored}"),
        Category::HeadToHead => format!("The head-to-head record leans toward {favored}"),
        Category::Injuries => format!("Injuries bite harder for {hurt}"),
        Category::HomeAdvantage => {
            if contribution.tilt >= 0.0 {
                format!("{} are strong at home", ctx.home_team)
            } else {
                format!("{} travel well", ctx.away_team)
            }
        }
        Category::Standings => format!("League standing favours {favored}"),
        Category::LiveContext => match note {
            Some(n) => return Some(format!("{}.", capitalize(n))),
            None => return None,
        },
    };

    Some(match note {
        Some(n) => format!("{body} ({n})."),
        None => format!("{body}."),
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
