use tracing::{debug, info, trace, warn};

use crate::{
    algorithm::collapse::{CollapsePolicy, collapse_cell},
    algorithm::propagation::propagate,
    algorithm::selection::select_lowest_entropy,
    analysis::patterns::ExamplePattern,
    analysis::rules::{AdjacencyRules, extract_rules},
    io::configuration::GenerationConfig,
    io::error::{AlgorithmError, Result},
    math::noise::{NoiseSource, PerlinNoise},
    math::random::{RandomSource, SeededRandom},
    spatial::grid::{DomainGrid, Position, ResolvedGrid},
};

/// Where a generation attempt stands after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverState {
    /// Unresolved cells remain and no contradiction has been seen
    Running,
    /// Some cell has no remaining category; the attempt is dead
    Contradiction,
    /// Every cell holds exactly one category
    Collapsed,
}

/// Progress snapshot emitted after every solver step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// 1-based attempt number
    pub attempt: usize,
    /// Steps taken within this attempt
    pub step: usize,
    /// Cells currently resolved
    pub resolved: usize,
    /// Total cells in the grid
    pub total: usize,
    /// State after the step
    pub state: SolverState,
}

/// Successful generation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// The fully collapsed grid
    pub grid: ResolvedGrid,
    /// Attempts used, including the successful one
    pub attempts: usize,
}

/// One generation attempt over a fresh domain grid
///
/// Drives selection, collapse and propagation one cell at a time. A solver
/// never recovers from a contradiction; callers discard it and start over.
pub struct Solver<'a> {
    grid: DomainGrid,
    rules: &'a AdjacencyRules,
    policy: &'a dyn CollapsePolicy,
    noise: &'a dyn NoiseSource,
    state: SolverState,
    steps: usize,
}

impl<'a> Solver<'a> {
    /// Create a solver where every cell may be any category
    pub fn new(
        rows: usize,
        cols: usize,
        rules: &'a AdjacencyRules,
        policy: &'a dyn CollapsePolicy,
        noise: &'a dyn NoiseSource,
    ) -> Self {
        Self {
            grid: DomainGrid::new(rows, cols, rules.alphabet().len()),
            rules,
            policy,
            noise,
            state: SolverState::Running,
            steps: 0,
        }
    }

    /// Current domain grid
    pub const fn grid(&self) -> &DomainGrid {
        &self.grid
    }

    /// Current state
    pub const fn state(&self) -> SolverState {
        self.state
    }

    /// Number of collapse steps taken
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Advance by one select, collapse and propagate cycle
    ///
    /// Finished solvers return their terminal state unchanged.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if a grid invariant is violated
    pub fn step(&mut self, random: &mut dyn RandomSource) -> Result<SolverState> {
        if self.state != SolverState::Running {
            return Ok(self.state);
        }

        let Some(position) = select_lowest_entropy(&self.grid, random) else {
            self.state = if self.grid.is_fully_collapsed() && self.is_consistent() {
                SolverState::Collapsed
            } else {
                SolverState::Contradiction
            };
            return Ok(self.state);
        };

        self.collapse_and_propagate(position)?;
        self.steps += 1;

        if self.grid.has_contradiction() {
            self.state = SolverState::Contradiction;
        }
        Ok(self.state)
    }

    /// Step until the attempt collapses or contradicts
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if a grid invariant is violated
    pub fn run(&mut self, random: &mut dyn RandomSource) -> Result<SolverState> {
        while self.step(random)? == SolverState::Running {}
        Ok(self.state)
    }

    /// The resolved grid, once collapsed
    pub fn resolved(&self) -> Option<ResolvedGrid> {
        if self.state == SolverState::Collapsed {
            self.grid.to_resolved(self.rules.alphabet())
        } else {
            None
        }
    }

    fn collapse_and_propagate(&mut self, position: Position) -> Result<()> {
        collapse_cell(self.policy, position, &mut self.grid, self.rules, self.noise)?;
        let report = propagate(position, &mut self.grid, self.rules)?;
        trace!(
            row = position[0],
            col = position[1],
            narrowed = report.narrowed,
            emptied = report.emptied,
            "collapsed cell"
        );
        Ok(())
    }

    // Catches rule sets where cells start out resolved and never propagate,
    // e.g. a single-category alphabet without self-adjacency
    fn is_consistent(&self) -> bool {
        self.grid.cells().all(|(position, domain)| {
            domain.resolved().is_some_and(|category| {
                self.grid.neighbors(position).all(|(direction, neighbor)| {
                    self.grid
                        .resolved_at(neighbor)
                        .is_some_and(|other| self.rules.permits(category, direction, other))
                })
            })
        })
    }
}

/// Generate a grid from an example pattern with seeded noise and randomness
///
/// # Errors
///
/// Returns `InvalidParameter` for an invalid configuration and
/// `GenerationFailed` once every allowed attempt has contradicted
pub fn generate(
    pattern: &ExamplePattern,
    config: &GenerationConfig,
    seed: u64,
) -> Result<ResolvedGrid> {
    let mut noise = PerlinNoise::from_generation_seed(seed);
    let mut random = SeededRandom::new(seed);
    generate_with(pattern, config, &mut noise, &mut random).map(|generation| generation.grid)
}

/// Generate a grid from an example pattern with injected noise and randomness
///
/// # Errors
///
/// Returns `InvalidParameter` for an invalid configuration and
/// `GenerationFailed` once every allowed attempt has contradicted
pub fn generate_with(
    pattern: &ExamplePattern,
    config: &GenerationConfig,
    noise: &mut dyn NoiseSource,
    random: &mut dyn RandomSource,
) -> Result<Generation> {
    let (rules, _) = extract_rules(pattern);
    let policy = config.mode.policy();
    generate_from_rules(&rules, config, policy.as_ref(), noise, random, &mut |_| {})
}

/// Run attempts against fixed rules until one collapses
///
/// Each contradiction discards the grid and restarts from scratch: the noise
/// field is reseeded from the random source before every later attempt, and
/// tie-breaks continue along the same stream. `observer` sees every step.
///
/// # Errors
///
/// Returns `InvalidParameter` for an invalid configuration,
/// `GenerationFailed` once `config.max_attempts` attempts have contradicted,
/// and `OutOfBounds` if a grid invariant is violated
pub fn generate_from_rules(
    rules: &AdjacencyRules,
    config: &GenerationConfig,
    policy: &dyn CollapsePolicy,
    noise: &mut dyn NoiseSource,
    random: &mut dyn RandomSource,
    observer: &mut dyn FnMut(&StepReport),
) -> Result<Generation> {
    config.validate()?;

    for attempt in 1..=config.max_attempts {
        if attempt > 1 {
            let seed = random.next_seed();
            noise.reseed(seed);
            debug!(attempt, seed, "reseeded noise");
        }
        let mut solver = Solver::new(config.height, config.width, rules, policy, &*noise);

        loop {
            let state = solver.step(random)?;
            observer(&StepReport {
                attempt,
                step: solver.steps(),
                resolved: solver.grid().resolved_count(),
                total: solver.grid().len(),
                state,
            });

            match state {
                SolverState::Running => {}
                SolverState::Contradiction => {
                    debug!(
                        attempt,
                        steps = solver.steps(),
                        width = config.width,
                        height = config.height,
                        "contradiction, restarting"
                    );
                    break;
                }
                SolverState::Collapsed => {
                    if let Some(grid) = solver.resolved() {
                        info!(attempts = attempt, mode = %config.mode, "grid collapsed");
                        return Ok(Generation {
                            grid,
                            attempts: attempt,
                        });
                    }
                    break;
                }
            }
        }
    }

    warn!(attempts = config.max_attempts, "attempt limit exhausted");
    Err(AlgorithmError::GenerationFailed {
        attempts: config.max_attempts,
    })
}
