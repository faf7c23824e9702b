//! Tests for the solver driver: stepping, restarts and results

#[cfg(test)]
mod tests {
    use wavetile::algorithm::collapse::{CollapseMode, ContextSensitive, NoiseBanded};
    use wavetile::algorithm::executor::{
        Solver, SolverState, StepReport, generate, generate_from_rules, generate_with,
    };
    use wavetile::analysis::patterns::{ExamplePattern, GRASS};
    use wavetile::analysis::rules::extract_rules;
    use wavetile::io::configuration::GenerationConfig;
    use wavetile::io::error::AlgorithmError;
    use wavetile::math::noise::{ConstantNoise, NoiseSource};
    use wavetile::math::random::{FirstChoice, SeededRandom};

    /// Constant field that counts how often it was reseeded
    struct CountingNoise {
        reseeds: Vec<u64>,
    }

    impl NoiseSource for CountingNoise {
        fn sample(&self, _x: f64, _y: f64) -> f64 {
            0.0
        }

        fn reseed(&mut self, seed: u64) {
            self.reseeds.push(seed);
        }
    }

    fn pattern(text: &str) -> ExamplePattern {
        ExamplePattern::parse(text).expect("Failed to parse fixture pattern")
    }

    fn config(width: usize, height: usize, mode: CollapseMode, max_attempts: usize) -> GenerationConfig {
        GenerationConfig {
            width,
            height,
            mode,
            max_attempts,
        }
    }

    // Tests stepping a solver to completion over terrain rules
    #[test]
    fn test_solver_runs_to_collapse() {
        let (rules, _) = extract_rules(&ExamplePattern::terrain());
        let policy = NoiseBanded::terrain();
        let noise = ConstantNoise(0.0);
        let mut solver = Solver::new(4, 5, &rules, &policy, &noise);

        assert_eq!(solver.state(), SolverState::Running);
        assert!(solver.resolved().is_none());

        let state = solver.run(&mut SeededRandom::new(1)).expect("Failed to run solver");
        assert_eq!(state, SolverState::Collapsed);
        assert!(solver.steps() <= 20);

        let grid = solver.resolved().expect("collapsed solver should resolve");
        assert_eq!((grid.rows(), grid.cols()), (4, 5));
        // Steps after completion do nothing
        assert_eq!(solver.step(&mut FirstChoice).ok(), Some(SolverState::Collapsed));
    }

    // Tests that context mode over terrain rules floods the grid with grass
    // Verified by breaking ties toward the highest category index
    #[test]
    fn test_context_mode_all_grass() {
        let grid = generate(
            &ExamplePattern::terrain(),
            &config(6, 4, CollapseMode::ContextSensitive, 1),
            5,
        )
        .expect("Failed to generate");
        assert!(grid.cells().all(|(_, category)| category == GRASS));
    }

    // Tests that contradictions restart up to the bound and then fail
    // Verified by returning after the first contradiction
    #[test]
    fn test_restart_bound() {
        let mut attempts_seen = Vec::new();
        let (rules, _) = extract_rules(&pattern("AB"));
        let result = generate_from_rules(
            &rules,
            &config(2, 2, CollapseMode::ContextSensitive, 4),
            &ContextSensitive,
            &mut ConstantNoise(0.0),
            &mut SeededRandom::new(0),
            &mut |report: &StepReport| attempts_seen.push(report.attempt),
        );

        assert!(matches!(result, Err(AlgorithmError::GenerationFailed { attempts: 4 })));
        assert_eq!(attempts_seen.iter().max(), Some(&4));
    }

    // Tests that every restart draws a fresh noise field from the random stream
    // Verified by reusing the first attempt's field on restart
    #[test]
    fn test_restart_reseeds_noise() {
        let (rules, _) = extract_rules(&pattern("AB"));
        let mut noise = CountingNoise { reseeds: Vec::new() };
        let result = generate_from_rules(
            &rules,
            &config(2, 2, CollapseMode::ContextSensitive, 4),
            &ContextSensitive,
            &mut noise,
            &mut SeededRandom::new(0),
            &mut |_| {},
        );

        assert!(result.is_err());
        assert_eq!(noise.reseeds.len(), 3);
        assert!(noise.reseeds.windows(2).all(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn test_first_attempt_keeps_initial_noise() {
        let mut noise = CountingNoise { reseeds: Vec::new() };
        let generation = generate_with(
            &ExamplePattern::terrain(),
            &GenerationConfig::with_size(5, 5),
            &mut noise,
            &mut SeededRandom::new(1),
        )
        .expect("Failed to generate");
        assert_eq!(generation.attempts, 1);
        assert!(noise.reseeds.is_empty());
    }

    // Tests the final consistency check on pre-resolved single-category grids
    #[test]
    fn test_single_category_needs_self_adjacency() {
        let rules_pattern = pattern("GG");
        let row = generate(&rules_pattern, &config(3, 1, CollapseMode::Base, 1), 0);
        assert!(row.is_ok_and(|grid| grid.cells().all(|(_, c)| c == GRASS)));

        // No vertical rules were observed
        let square = generate(&rules_pattern, &config(2, 2, CollapseMode::Base, 3), 0);
        assert!(matches!(square, Err(AlgorithmError::GenerationFailed { attempts: 3 })));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let terrain = ExamplePattern::terrain();
        for bad in [
            config(0, 5, CollapseMode::Base, 1),
            config(5, 0, CollapseMode::Base, 1),
            config(5, 5, CollapseMode::Base, 0),
        ] {
            assert!(matches!(
                generate(&terrain, &bad, 0),
                Err(AlgorithmError::InvalidParameter { .. })
            ));
        }
    }

    // Tests that injected sources make generation reproducible
    #[test]
    fn test_generate_with_is_deterministic() {
        let terrain = ExamplePattern::terrain();
        let cfg = GenerationConfig::with_size(12, 9);
        let first = generate_with(&terrain, &cfg, &mut ConstantNoise(0.3), &mut SeededRandom::new(8))
            .expect("Failed to generate");
        let second = generate_with(&terrain, &cfg, &mut ConstantNoise(0.3), &mut SeededRandom::new(8))
            .expect("Failed to generate");
        assert_eq!(first, second);
        assert_eq!(first.attempts, 1);
    }

    #[test]
    fn test_step_reports_track_progress() {
        let (rules, _) = extract_rules(&ExamplePattern::terrain());
        let mut reports = Vec::new();
        let generation = generate_from_rules(
            &rules,
            &config(3, 3, CollapseMode::Base, 1),
            &NoiseBanded::terrain(),
            &mut ConstantNoise(-0.5),
            &mut SeededRandom::new(2),
            &mut |report: &StepReport| reports.push(*report),
        )
        .expect("Failed to generate");

        assert_eq!(generation.grid.rows(), 3);
        let last = reports.last().expect("at least one step should be reported");
        assert_eq!(last.state, SolverState::Collapsed);
        assert_eq!(last.resolved, last.total);
        assert!(reports.windows(2).all(|w| w[0].resolved <= w[1].resolved));
    }
}
