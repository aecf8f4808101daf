//! Synthetic visit generator
//!
//! Generation runs as whole-column passes over all rows, in a fixed draw
//! order, from one seeded `StdRng`. The same plan always yields the same
//! table.

use std::time::Instant;

use chrono::{Datelike, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use indicatif::ProgressBar;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::algorithm::generation::model::{
    self, AGE_GROUP_WEIGHTS, BASELINE_COMPLAINT_WEIGHTS, DOOR_TO_PROVIDER_NOISE_SD,
    FLU_WAVE_COMPLAINT_WEIGHTS, FLU_WAVE_WINDOW, LENGTH_OF_STAY_NOISE_SD, MINUTES_PER_DAY,
    OCCUPANCY_NOISE_SD, POD_WEIGHTS, TRIAGE_WEIGHTS,
};
use crate::algorithm::generation::sampling::{Categorical, standard_normal, uniform};
use crate::config::{GenerationPlan, GeneratorConfig};
use crate::error::Result;
use crate::models::types::{ArrivalMode, is_weekend};
use crate::models::visit::Visit;
use crate::utils::io::write_visits;
use crate::utils::logging::{create_hidden_progress_bar, create_main_progress_bar, finish_progress_bar};

/// Number of column passes reported on the progress bar
const GENERATION_PASSES: u64 = 11;

/// Generator of synthetic ED visits
#[derive(Debug, Clone)]
pub struct VisitGenerator {
    plan: GenerationPlan,
    show_progress: bool,
}

impl VisitGenerator {
    /// Create a generator for a validated plan
    #[must_use]
    pub const fn new(plan: GenerationPlan) -> Self {
        Self {
            plan,
            show_progress: false,
        }
    }

    /// Draw a progress bar on stderr while generating
    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// The plan this generator runs
    #[must_use]
    pub const fn plan(&self) -> &GenerationPlan {
        &self.plan
    }

    /// Generate the full table
    pub fn generate(&self) -> Result<Vec<Visit>> {
        let plan = &self.plan;
        let n = plan.visits;
        info!(
            "Generating {} visits over {} days from {} (seed {})",
            n, plan.days, plan.start_date, plan.seed
        );
        let started = Instant::now();

        let age_dist = Categorical::new(&AGE_GROUP_WEIGHTS)?;
        let triage_dist = Categorical::new(&TRIAGE_WEIGHTS)?;
        let pod_dist = Categorical::new(&POD_WEIGHTS)?;
        let baseline_complaints = Categorical::new(&BASELINE_COMPLAINT_WEIGHTS)?;
        let flu_complaints = Categorical::new(&FLU_WAVE_COMPLAINT_WEIGHTS)?;

        let progress = if self.show_progress {
            create_main_progress_bar(GENERATION_PASSES, Some("Generating visits"))
        } else {
            create_hidden_progress_bar(GENERATION_PASSES)
        };

        let mut rng = StdRng::seed_from_u64(plan.seed);

        // Arrival time, whole minutes inside the window
        let start = plan.start_date.and_time(NaiveTime::MIN);
        let window_minutes = i64::from(plan.days) * MINUTES_PER_DAY;
        let offsets: Vec<i64> = (0..n)
            .map(|_| {
                let minutes = (uniform(&mut rng) * window_minutes as f64).floor() as i64;
                minutes.min(window_minutes - 1)
            })
            .collect();
        let arrivals: Vec<NaiveDateTime> = offsets
            .iter()
            .map(|&minutes| start + TimeDelta::minutes(minutes))
            .collect();
        advance(&progress, "arrivals");

        // Calendar effects and crowding
        let weekend: Vec<bool> = arrivals.iter().map(|a| is_weekend(a.weekday())).collect();
        let flu_wave: Vec<bool> = offsets
            .iter()
            .map(|&minutes| FLU_WAVE_WINDOW.contains(minutes / MINUTES_PER_DAY))
            .collect();
        let intensity: Vec<f64> = arrivals
            .iter()
            .map(|a| model::hour_intensity(a.hour()))
            .collect();
        let max_intensity = intensity.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let occupancy: Vec<f64> = (0..n)
            .map(|i| {
                let noise = OCCUPANCY_NOISE_SD * standard_normal(&mut rng);
                model::bed_occupancy(intensity[i], max_intensity, weekend[i], flu_wave[i], noise)
            })
            .collect();
        advance(&progress, "occupancy");

        // Patient attributes
        let age_group: Vec<_> = (0..n).map(|_| age_dist.sample(&mut rng)).collect();
        let triage: Vec<_> = (0..n).map(|_| triage_dist.sample(&mut rng)).collect();
        let acuity_draws: Vec<f64> = (0..n).map(|_| uniform(&mut rng)).collect();
        let override_draws: Vec<f64> = (0..n).map(|_| uniform(&mut rng)).collect();
        let arrival_mode: Vec<ArrivalMode> = (0..n)
            .map(|i| model::arrival_mode(triage[i], acuity_draws[i], override_draws[i]))
            .collect();
        let pod: Vec<_> = (0..n).map(|_| pod_dist.sample(&mut rng)).collect();
        advance(&progress, "patient attributes");

        // Chief complaint, distribution chosen per row
        let complaint: Vec<_> = flu_wave
            .iter()
            .map(|&flu| {
                if flu {
                    flu_complaints.sample(&mut rng)
                } else {
                    baseline_complaints.sample(&mut rng)
                }
            })
            .collect();
        advance(&progress, "chief complaints");

        // Orders
        let labs_ordered: Vec<bool> = (0..n)
            .map(|i| uniform(&mut rng) < model::labs_probability(triage[i], complaint[i]))
            .collect();
        advance(&progress, "labs");
        let imaging_ordered: Vec<bool> = (0..n)
            .map(|i| uniform(&mut rng) < model::imaging_probability(triage[i], complaint[i]))
            .collect();
        advance(&progress, "imaging");

        // Operational outcomes
        let door_to_provider: Vec<u32> = (0..n)
            .map(|i| {
                let noise = DOOR_TO_PROVIDER_NOISE_SD * standard_normal(&mut rng);
                model::door_to_provider(occupancy[i], flu_wave[i], triage[i], noise)
            })
            .collect();
        advance(&progress, "door-to-provider");
        let length_of_stay: Vec<u32> = (0..n)
            .map(|i| {
                let noise = LENGTH_OF_STAY_NOISE_SD * standard_normal(&mut rng);
                model::length_of_stay(
                    occupancy[i],
                    labs_ordered[i],
                    imaging_ordered[i],
                    triage[i],
                    flu_wave[i],
                    noise,
                )
            })
            .collect();
        advance(&progress, "length of stay");

        // Disposition: every LWBS draw, then every admission draw
        let lwbs_draws: Vec<f64> = (0..n).map(|_| uniform(&mut rng)).collect();
        advance(&progress, "LWBS draws");
        let admit_draws: Vec<f64> = (0..n).map(|_| uniform(&mut rng)).collect();
        advance(&progress, "admission draws");

        let visits: Vec<Visit> = (0..n)
            .map(|i| {
                let lwbs_prob = model::lwbs_probability(
                    door_to_provider[i],
                    occupancy[i],
                    triage[i],
                    flu_wave[i],
                );
                let admit_prob =
                    model::admit_probability(triage[i], complaint[i], age_group[i], occupancy[i]);

                Visit {
                    visit_id: i as u64 + 1,
                    arrival: arrivals[i],
                    triage_level: triage[i],
                    chief_complaint: complaint[i],
                    age_group: age_group[i],
                    arrival_mode: arrival_mode[i],
                    pod: pod[i],
                    labs_ordered: labs_ordered[i],
                    imaging_ordered: imaging_ordered[i],
                    bed_occupancy_pct: occupancy[i],
                    door_to_provider_min: door_to_provider[i],
                    length_of_stay_min: length_of_stay[i],
                    disposition: model::decide_disposition(
                        lwbs_draws[i],
                        admit_draws[i],
                        lwbs_prob,
                        admit_prob,
                    ),
                    flu_wave: flu_wave[i],
                }
            })
            .collect();
        advance(&progress, "assembling records");

        finish_progress_bar(&progress, Some("Generation complete"));
        debug!(
            "{} of {} visits fall in the flu-wave window",
            flu_wave.iter().filter(|&&f| f).count(),
            n
        );
        info!("Generated {} visits in {:?}", visits.len(), started.elapsed());

        Ok(visits)
    }
}

fn advance(progress: &ProgressBar, stage: &'static str) {
    progress.set_message(stage);
    progress.inc(1);
}

/// Generate `n` visits over `days` days from `start_date` with a seed
///
/// Parameters are validated before any draw is made.
pub fn generate(n: i64, start_date: &str, days: i64, seed: u64) -> Result<Vec<Visit>> {
    let plan = GenerationPlan::new(n, start_date, days, seed)?;
    VisitGenerator::new(plan).generate()
}

/// Validate a configuration, generate the table and write it to `config.output`
///
/// Nothing is written when validation or generation fails.
pub fn generate_to_file(config: &GeneratorConfig, show_progress: bool) -> Result<Vec<Visit>> {
    let plan = config.validate()?;
    let visits = VisitGenerator::new(plan)
        .with_progress(show_progress)
        .generate()?;
    write_visits(&config.output, &visits)?;
    Ok(visits)
}
