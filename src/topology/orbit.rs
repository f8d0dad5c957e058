//! Orbit iterators over the darts of a combinatorial map.
//!
//! An orbit is the set of darts reachable from a start dart through a group
//! of relations. Two traversal strategies are used:
//!
//! - **cyclic**: a single permutation (`Next`) is applied until the start
//!   dart recurs. A missing image, or more steps than there are darts,
//!   means the cycle is broken and is reported as
//!   [`MapError::MalformedTopology`].
//! - **closure**: breadth-first search over several (possibly composed)
//!   relations with a visited set. Unlinked images are skipped, so boundary
//!   orbits are finite and open.
//!
//! Both are lazy, yield `Result<DartId, MapError>`, are fused after an error,
//! and can be restarted with [`Orbit::restart`].

use std::collections::VecDeque;

use hashbrown::HashSet;

use crate::map_error::MapError;
use crate::topology::cmap::CombinatorialMap;
use crate::topology::ids::{DartId, NULL_DART};
use crate::topology::relation::{Dimensionality, Relation};

use crate::topology::relation::Relation::{
    Involution as B2, Next as B1, Previous as B0, VolumeInvolution as B3,
};

/// Which orbit to enumerate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbitPolicy {
    /// Darts sharing the start dart's vertex.
    Vertex,
    /// Darts of the start dart's edge: ⟨β2⟩ in 2D, ⟨β2, β3⟩ in 3D.
    Edge,
    /// Darts of the start dart's face: the β1 cycle in 2D, ⟨β1, β0, β3⟩ in 3D.
    Face,
    /// The β1 cycle through the start dart, in any dimension.
    FaceLinear,
    /// Darts of the start dart's volume: ⟨β1, β0, β2⟩.
    Volume,
    /// Closure under an arbitrary set of relations.
    Custom(&'static [Relation]),
}

// Each path is applied left to right: `[B2, B1]` is β1∘β2.
const VERTEX_2D: &[&[Relation]] = &[&[B2, B1], &[B0, B2]];
const VERTEX_3D: &[&[Relation]] = &[&[B2, B3], &[B3, B1], &[B2, B1], &[B0, B3], &[B0, B2]];
const EDGE_2D: &[&[Relation]] = &[&[B2]];
const EDGE_3D: &[&[Relation]] = &[&[B2], &[B3]];
const FACE_3D: &[&[Relation]] = &[&[B1], &[B0], &[B3]];
const VOLUME: &[&[Relation]] = &[&[B1], &[B0], &[B2]];

#[derive(Clone, Debug)]
enum Paths {
    Composed(&'static [&'static [Relation]]),
    Single(&'static [Relation]),
}

impl Paths {
    fn for_policy(
        policy: OrbitPolicy,
        dim: Dimensionality,
    ) -> Result<Option<Paths>, MapError> {
        let three = dim == Dimensionality::Three;
        Ok(Some(match policy {
            OrbitPolicy::FaceLinear => return Ok(None),
            OrbitPolicy::Face if !three => return Ok(None),
            OrbitPolicy::Face => Paths::Composed(FACE_3D),
            OrbitPolicy::Vertex if three => Paths::Composed(VERTEX_3D),
            OrbitPolicy::Vertex => Paths::Composed(VERTEX_2D),
            OrbitPolicy::Edge if three => Paths::Composed(EDGE_3D),
            OrbitPolicy::Edge => Paths::Composed(EDGE_2D),
            OrbitPolicy::Volume => Paths::Composed(VOLUME),
            OrbitPolicy::Custom(relations) => {
                for &r in relations {
                    dim.check(r)?;
                }
                Paths::Single(relations)
            }
        }))
    }
}

#[derive(Clone, Debug)]
enum State {
    Cycle {
        current: u32,
    },
    Closure {
        paths: Paths,
        pending: VecDeque<u32>,
        marked: HashSet<u32>,
    },
    Failed(MapError),
    Done,
}

/// Lazy orbit iterator; see the module documentation.
#[derive(Clone, Debug)]
pub struct Orbit<'a> {
    map: &'a CombinatorialMap,
    policy: OrbitPolicy,
    start: DartId,
    bound: usize,
    steps: usize,
    state: State,
}

impl<'a> Orbit<'a> {
    /// Starts an orbit at `start`.
    ///
    /// Fails with [`MapError::InvalidReference`] for an unknown dart and with
    /// [`MapError::Configuration`] for a custom relation the map lacks.
    pub fn new(
        map: &'a CombinatorialMap,
        policy: OrbitPolicy,
        start: DartId,
    ) -> Result<Self, MapError> {
        if !map.contains_dart(start) {
            return Err(MapError::unknown_dart(start.get()));
        }
        let state = Self::initial_state(map, policy, start)?;
        Ok(Self {
            map,
            policy,
            start,
            bound: map.dart_count(),
            steps: 0,
            state,
        })
    }

    fn initial_state(
        map: &CombinatorialMap,
        policy: OrbitPolicy,
        start: DartId,
    ) -> Result<State, MapError> {
        Ok(match Paths::for_policy(policy, map.dimensionality())? {
            None => State::Cycle {
                current: start.get(),
            },
            Some(paths) => {
                let mut marked = HashSet::new();
                marked.insert(NULL_DART);
                marked.insert(start.get());
                State::Closure {
                    paths,
                    pending: VecDeque::from([start.get()]),
                    marked,
                }
            }
        })
    }

    /// Rewinds the iterator to the start dart.
    pub fn restart(&mut self) {
        self.steps = 0;
        // the policy was accepted by `new`, so this cannot fail
        if let Ok(state) = Self::initial_state(self.map, self.policy, self.start) {
            self.state = state;
        }
    }

    #[inline]
    pub fn start(&self) -> DartId {
        self.start
    }

    #[inline]
    pub fn policy(&self) -> OrbitPolicy {
        self.policy
    }

    fn follow(&self, d: u32, path: &[Relation]) -> u32 {
        path.iter().fold(d, |cur, &r| {
            if cur == NULL_DART {
                NULL_DART
            } else {
                self.map.beta_raw(r, cur)
            }
        })
    }

    fn open_orbit(&self, at: u32) -> MapError {
        MapError::MalformedTopology {
            start: self.start.get(),
            detail: format!("face cycle is open at dart {at}"),
        }
    }

    fn unbounded_orbit(&self) -> MapError {
        MapError::MalformedTopology {
            start: self.start.get(),
            detail: format!("orbit did not close within {} steps", self.bound),
        }
    }
}

impl Iterator for Orbit<'_> {
    type Item = Result<DartId, MapError>;

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::replace(&mut self.state, State::Done) {
            State::Done => None,
            State::Failed(e) => Some(Err(e)),
            State::Cycle { current } => {
                self.steps += 1;
                let succ = self.map.beta_raw(Relation::Next, current);
                self.state = if succ == self.start.get() {
                    State::Done
                } else if succ == NULL_DART {
                    State::Failed(self.open_orbit(current))
                } else if self.steps >= self.bound {
                    State::Failed(self.unbounded_orbit())
                } else {
                    State::Cycle { current: succ }
                };
                DartId::from_raw(current).map(Ok)
            }
            State::Closure {
                paths,
                mut pending,
                mut marked,
            } => {
                let d = pending.pop_front()?;
                self.steps += 1;
                if self.steps > self.bound {
                    self.state = State::Done;
                    return Some(Err(self.unbounded_orbit()));
                }
                match &paths {
                    Paths::Composed(list) => {
                        for path in list.iter() {
                            let image = self.follow(d, path);
                            if marked.insert(image) {
                                pending.push_back(image);
                            }
                        }
                    }
                    Paths::Single(relations) => {
                        for &r in relations.iter() {
                            let image = self.map.beta_raw(r, d);
                            if marked.insert(image) {
                                pending.push_back(image);
                            }
                        }
                    }
                }
                self.state = State::Closure {
                    paths,
                    pending,
                    marked,
                };
                DartId::from_raw(d).map(Ok)
            }
        }
    }
}

impl std::iter::FusedIterator for Orbit<'_> {}

impl CombinatorialMap {
    /// Lazy orbit of `start` under `policy`.
    pub fn orbit(&self, start: DartId, policy: OrbitPolicy) -> Result<Orbit<'_>, MapError> {
        Orbit::new(self, policy, start)
    }

    /// Collects the orbit of `start`, failing on the first error.
    pub fn orbit_darts(&self, start: DartId, policy: OrbitPolicy) -> Result<Vec<DartId>, MapError> {
        self.orbit(start, policy)?.collect()
    }
}
