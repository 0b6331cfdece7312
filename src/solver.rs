//! Exhaustive route optimizer.
//!
//! Scores every ordering of the waypoints as a closed tour and keeps the
//! cheapest. Orderings are visited in lexicographic order of input positions;
//! on an exact tie the ordering seen first wins. The work is O(N!·N), so the
//! number of waypoints is capped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::cost::adjusted_cost;
use crate::error::RouteError;
use crate::factors::RouteFactors;
use crate::haversine::DistanceTable;
use crate::models::{round2, tour_legs, Leg};

/// Permutations scored between two cancellation checks.
const CANCEL_CHECK_INTERVAL: u64 = 512;

#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Split the search across the rayon thread pool.
    pub parallel: bool,
    /// Largest waypoint set accepted for exhaustive search.
    pub max_waypoints: usize,
    /// Abort with `SearchCancelled` once this much time has passed.
    pub time_limit: Option<Duration>,
    /// Abort with `SearchCancelled` once this flag is set.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            max_waypoints: 10, // 10! = 3.6M tours
            time_limit: None,
            cancel: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimalRoute {
    /// Winning ordering exactly as enumerated; closes back to `tour[0]`.
    pub tour: Vec<String>,
    /// Total adjusted cost, rounded to 2 decimals.
    pub cost: f64,
    /// Permutations fully scored.
    pub evaluated: u64,
    /// Permutations dropped because a leg had no distance or factors.
    pub skipped: u64,
}

/// Rejects sets with fewer than two waypoints or repeated identifiers.
pub fn validate_waypoint_set(waypoints: &[String]) -> Result<(), RouteError> {
    if waypoints.len() < 2 {
        return Err(RouteError::InvalidWaypointSet(format!(
            "at least two waypoints are required, got {}",
            waypoints.len()
        )));
    }

    for (i, id) in waypoints.iter().enumerate() {
        if waypoints[..i].contains(id) {
            return Err(RouteError::InvalidWaypointSet(format!("duplicate waypoint '{}'", id)));
        }
    }

    Ok(())
}

/// Adjusted cost of one closed tour.
pub fn route_cost(tour: &[String], distances: &DistanceTable, factors: &RouteFactors) -> Result<f64, RouteError> {
    let mut total = 0.0;
    for leg in tour_legs(tour) {
        total += leg_cost(&leg, distances, factors)?;
    }
    Ok(total)
}

fn leg_cost(leg: &Leg, distances: &DistanceTable, factors: &RouteFactors) -> Result<f64, RouteError> {
    let base = distances
        .get(&leg.from, &leg.to)
        .ok_or_else(|| RouteError::DistanceNotFound(leg.clone()))?;
    adjusted_cost(leg, base, factors)
}

/// Finds the minimum-cost closed tour over `waypoints`.
///
/// A permutation that touches a leg without distance or factors is skipped
/// and the search goes on. If every permutation is skipped, the error of the
/// first one (in enumeration order) is returned.
pub fn find_optimal_route(
    waypoints: &[String],
    distances: &DistanceTable,
    factors: &RouteFactors,
    options: &SolveOptions,
) -> Result<OptimalRoute, RouteError> {
    validate_waypoint_set(waypoints)?;
    if waypoints.len() > options.max_waypoints {
        return Err(RouteError::TooManyWaypoints {
            count: waypoints.len(),
            max: options.max_waypoints,
        });
    }

    let n = waypoints.len();
    info!(
        waypoints = n,
        permutations = factorial(n),
        parallel = options.parallel,
        "starting exhaustive route search"
    );

    let costs = LegCosts::build(waypoints, distances, factors);
    let guard = CancelGuard::new(options);

    let partitions: Vec<PartitionResult> = if options.parallel {
        (0..n)
            .into_par_iter()
            .map(|first| search_partition(first, &costs, &guard))
            .collect::<Result<_, _>>()?
    } else {
        (0..n)
            .map(|first| search_partition(first, &costs, &guard))
            .collect::<Result<_, _>>()?
    };

    // Partitions are contiguous blocks of the canonical order, so folding them
    // in index order with a strict comparison keeps the first tie.
    let mut best: Option<(f64, Vec<usize>)> = None;
    let mut first_error: Option<RouteError> = None;
    let mut evaluated = 0;
    let mut skipped = 0;
    for partition in partitions {
        evaluated += partition.evaluated;
        skipped += partition.skipped;
        if first_error.is_none() {
            first_error = partition.first_error;
        }
        if let Some((cost, order)) = partition.best {
            if best.as_ref().is_none_or(|(best_cost, _)| cost < *best_cost) {
                best = Some((cost, order));
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, evaluated, "permutations skipped for missing segment data");
    }

    let Some((cost, order)) = best else {
        return Err(first_error.unwrap_or_else(|| {
            RouteError::InvalidWaypointSet("no permutation could be scored".to_string())
        }));
    };

    let tour: Vec<String> = order.iter().map(|&i| waypoints[i].clone()).collect();
    let cost = round2(cost);
    info!(tour = %tour.join(" -> "), cost, evaluated, "optimal route found");

    Ok(OptimalRoute {
        tour,
        cost,
        evaluated,
        skipped,
    })
}

/// Directed leg costs by input position, computed once per search.
struct LegCosts {
    n: usize,
    costs: Vec<Result<f64, RouteError>>,
}

impl LegCosts {
    fn build(waypoints: &[String], distances: &DistanceTable, factors: &RouteFactors) -> Self {
        let n = waypoints.len();
        let mut costs = Vec::with_capacity(n * n);
        for (i, from) in waypoints.iter().enumerate() {
            for (j, to) in waypoints.iter().enumerate() {
                if i == j {
                    costs.push(Ok(0.0));
                    continue;
                }
                let cost = leg_cost(&Leg::new(from.as_str(), to.as_str()), distances, factors);
                if let Err(err) = &cost {
                    if i < j {
                        warn!(error = %err, "leg cannot be costed");
                    }
                }
                costs.push(cost);
            }
        }
        Self { n, costs }
    }

    fn get(&self, from: usize, to: usize) -> &Result<f64, RouteError> {
        &self.costs[from * self.n + to]
    }

    /// Sum over consecutive legs, then the closing leg.
    fn tour_cost(&self, order: &[usize]) -> Result<f64, &RouteError> {
        let mut total = 0.0;
        for i in 0..order.len() {
            let next = order[(i + 1) % order.len()];
            match self.get(order[i], next) {
                Ok(cost) => total += cost,
                Err(err) => return Err(err),
            }
        }
        Ok(total)
    }
}

struct CancelGuard {
    deadline: Option<Instant>,
    flag: Option<Arc<AtomicBool>>,
}

impl CancelGuard {
    fn new(options: &SolveOptions) -> Self {
        Self {
            // a limit past the clock's range means no deadline
            deadline: options
                .time_limit
                .and_then(|limit| Instant::now().checked_add(limit)),
            flag: options.cancel.clone(),
        }
    }

    fn check(&self) -> Result<(), RouteError> {
        let flagged = self
            .flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed));
        let expired = self.deadline.is_some_and(|deadline| Instant::now() >= deadline);
        if flagged || expired {
            Err(RouteError::SearchCancelled)
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Default)]
struct PartitionResult {
    best: Option<(f64, Vec<usize>)>,
    evaluated: u64,
    skipped: u64,
    first_error: Option<RouteError>,
}

/// Scores every ordering that starts at position `first`, in lexicographic order.
fn search_partition(first: usize, costs: &LegCosts, guard: &CancelGuard) -> Result<PartitionResult, RouteError> {
    let mut order: Vec<usize> = std::iter::once(first)
        .chain((0..costs.n).filter(|&i| i != first))
        .collect();
    let mut result = PartitionResult::default();
    let mut since_check = 0;

    loop {
        if since_check == 0 {
            guard.check()?;
        }
        since_check = (since_check + 1) % CANCEL_CHECK_INTERVAL;

        match costs.tour_cost(&order) {
            Ok(cost) => {
                result.evaluated += 1;
                if result.best.as_ref().is_none_or(|(best_cost, _)| cost < *best_cost) {
                    result.best = Some((cost, order.clone()));
                }
            }
            Err(err) => {
                result.skipped += 1;
                if result.first_error.is_none() {
                    result.first_error = Some(err.clone());
                }
            }
        }

        if !next_permutation(&mut order[1..]) {
            break;
        }
    }

    debug!(
        first,
        evaluated = result.evaluated,
        skipped = result.skipped,
        best = result.best.as_ref().map(|(cost, _)| *cost),
        "partition searched"
    );
    Ok(result)
}

/// Rearranges `items` into the next lexicographic permutation.
/// Returns false (leaving `items` untouched) when already at the last one.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }

    let Some(pivot) = (0..items.len() - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        return false;
    };
    let Some(successor) = (pivot + 1..items.len()).rev().find(|&j| items[j] > items[pivot]) else {
        return false;
    };

    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}

fn factorial(n: usize) -> u64 {
    (1..=n as u64).fold(1, |acc, k| acc.saturating_mul(k))
}
