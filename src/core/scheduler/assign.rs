//! Greedy slot assignment

use super::{TermAssignments, TermScheduler};
use crate::core::models::{UnplacedCourse, UnplacedReason, SLOT_COUNT};
use crate::core::scoring::ScoredCourse;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

impl<'a> TermScheduler<'a> {
    /// Place ranked courses into slots
    ///
    /// Each course goes into the first slot in chronological order that it is
    /// offered in, that the preferred terms allow, and that has room under the
    /// credit cap. With prerequisite ordering enforced, courses are processed
    /// in a prerequisite-respecting order and the scan starts after their
    /// placed prerequisites. Courses with no such slot are recorded as
    /// unplaced; one bad course never fails the run.
    ///
    /// # Arguments
    /// * `ranked` - Courses sorted by descending score (see `rank_courses`)
    #[must_use]
    pub fn assign(&self, ranked: &[ScoredCourse<'a>]) -> TermAssignments<'a> {
        let mut assignments = TermAssignments::new();
        let enforce = self.settings.enforce_prerequisite_order;

        let order: Vec<&ScoredCourse<'a>> = if enforce {
            self.placement_order(ranked)
        } else {
            ranked.iter().collect()
        };

        for scored in order {
            let course = scored.course;

            let earliest = if enforce {
                let Some(earliest) = self.earliest_slot(course, &assignments) else {
                    crate::debug!(
                        "{}: a prerequisite is unplaced; leaving it out of the plan",
                        course.code
                    );
                    assignments.unplaced.push(UnplacedCourse {
                        code: course.code.clone(),
                        reason: UnplacedReason::PrerequisiteUnplaced,
                    });
                    continue;
                };
                earliest
            } else {
                0
            };

            match self.first_fitting_slot(course, &assignments, earliest, SLOT_COUNT - 1, None) {
                Some(idx) => {
                    crate::debug!(
                        "Placed {} (score {:.1}) in {}",
                        course.code,
                        scored.score,
                        assignments.terms[idx].slot
                    );
                    assignments.place(idx, course);
                }
                None => {
                    crate::debug!("{}: no eligible term; leaving it unplaced", course.code);
                    assignments.unplaced.push(UnplacedCourse {
                        code: course.code.clone(),
                        reason: UnplacedReason::NoEligibleTerm,
                    });
                }
            }
        }

        assignments
    }

    /// Order courses so blocking prerequisites come first (Kahn's algorithm)
    ///
    /// Among courses whose prerequisites are all processed, the one ranked
    /// highest goes next, so the result is the score order whenever the
    /// graph allows it.
    fn placement_order<'r>(&self, ranked: &'r [ScoredCourse<'a>]) -> Vec<&'r ScoredCourse<'a>> {
        let rank_of: HashMap<&str, usize> = ranked
            .iter()
            .enumerate()
            .map(|(rank, s)| (s.course.code.as_str(), rank))
            .collect();

        let mut indegree = vec![0usize; ranked.len()];
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); ranked.len()];
        for (rank, scored) in ranked.iter().enumerate() {
            for prereq in self.dag.blocking_prerequisites(&scored.course.code) {
                if let Some(&prereq_rank) = rank_of.get(prereq.as_str()) {
                    if prereq_rank != rank {
                        successors[prereq_rank].push(rank);
                        indegree[rank] += 1;
                    }
                }
            }
        }

        let mut ready: BinaryHeap<Reverse<usize>> = indegree
            .iter()
            .enumerate()
            .filter(|(_, &deg)| deg == 0)
            .map(|(rank, _)| Reverse(rank))
            .collect();

        let mut order = Vec::with_capacity(ranked.len());
        let mut done = vec![false; ranked.len()];
        while let Some(Reverse(rank)) = ready.pop() {
            order.push(&ranked[rank]);
            done[rank] = true;
            for &next in &successors[rank] {
                indegree[next] -= 1;
                if indegree[next] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        // Only reachable with a cycle, which the generator rejects up front
        if order.len() != ranked.len() {
            order.extend(
                ranked
                    .iter()
                    .enumerate()
                    .filter(|(rank, _)| !done[*rank])
                    .map(|(_, s)| s),
            );
        }

        order
    }
}
