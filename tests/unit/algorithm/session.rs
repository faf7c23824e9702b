//! Tests for regenerable map sessions

#[cfg(test)]
mod tests {
    use wavetile::algorithm::collapse::CollapseMode;
    use wavetile::algorithm::decoration::DecorationConfig;
    use wavetile::algorithm::session::MapSession;
    use wavetile::analysis::patterns::{ExamplePattern, GRASS, SAND};
    use wavetile::io::configuration::GenerationConfig;

    fn session(seed: u64) -> MapSession {
        MapSession::new(ExamplePattern::terrain(), GenerationConfig::with_size(10, 8), seed)
            .expect("Failed to create session")
    }

    // Tests that sessions from the same seed replay the same map sequence
    // Verified by reusing the session seed for every regeneration
    #[test]
    fn test_regenerate_sequence_is_reproducible() {
        let mut first = session(21);
        let mut second = session(21);

        let a1 = first.regenerate().expect("Failed to regenerate").clone();
        let a2 = first.regenerate().expect("Failed to regenerate").clone();
        let b1 = second.regenerate().expect("Failed to regenerate").clone();
        let b2 = second.regenerate().expect("Failed to regenerate").clone();

        assert_eq!(a1, b1);
        assert_eq!(a2, b2);
        assert_ne!(a1.seed, a2.seed);
    }

    #[test]
    fn test_current_tracks_last_map() {
        let mut session = session(3);
        assert!(session.current().is_none());

        let seed = session.regenerate().expect("Failed to regenerate").seed;
        let current = session.current().expect("map should be stored");
        assert_eq!(current.seed, seed);
        assert_eq!((current.grid.rows(), current.grid.cols()), (8, 10));
        assert_eq!(current.attempts, 1);
    }

    // Tests mode switching between regenerations
    #[test]
    fn test_toggle_mode() {
        let mut session = session(4);
        assert_eq!(session.mode(), CollapseMode::Base);
        assert_eq!(session.toggle_mode(), CollapseMode::ContextSensitive);
        assert_eq!(session.config().mode, CollapseMode::ContextSensitive);

        let map = session.regenerate().expect("Failed to regenerate");
        assert!(map.grid.cells().all(|(_, category)| category == GRASS));

        session.set_mode(CollapseMode::Base);
        assert_eq!(session.mode(), CollapseMode::Base);
    }

    #[test]
    fn test_decorations_follow_configuration() {
        let mut plain = session(6).with_decorating(false);
        assert!(plain.regenerate().expect("Failed to regenerate").decorations.is_empty());

        // Only sand can be decorated, at any noise value
        let config = DecorationConfig::new(5.0)
            .with_rule(SAND, 0.0, vec![9])
            .expect("Failed to build decoration config");
        let mut sandy = session(6).with_decorations(config);
        let map = sandy.regenerate().expect("Failed to regenerate");
        for (position, id) in map.decorations.iter() {
            assert_eq!(id, 9);
            assert_eq!(map.grid.get(position), Some(SAND));
        }
    }

    #[test]
    fn test_rules_extracted_once() {
        let session = session(0);
        assert_eq!(session.frequencies().total(), 42);
        assert_eq!(session.rules().alphabet().len(), 3);
        assert_eq!(session.pattern().rows(), 7);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = MapSession::new(ExamplePattern::terrain(), GenerationConfig::with_size(0, 4), 1);
        assert!(result.is_err());
    }
}
