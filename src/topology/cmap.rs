//! The combinatorial map store.
//!
//! [`CombinatorialMap`] owns two decoupled tables cross-referenced by id:
//!
//! - the **dart table**: a flat `Vec<u32>` of beta images with one row of
//!   `dimensionality + 1` entries per dart, plus a parallel `Vec<u32>` of
//!   vertex references. Row `0` is the null dart; a `0` image means the
//!   relation is unlinked.
//! - the **vertex table**: dense [`CuVertex2`] or [`CuVertex3`] records.
//!
//! This is the layout a device kernel writes directly, so bulk construction
//! is a matter of filling slots. Every mutating operation validates all of
//! its inputs before writing anything: a failed call leaves the map as it
//! was.

use crate::data::coordinates::{CuVertex2, CuVertex3, Position, VertexTable};
use crate::debug_invariants::DebugInvariants;
use crate::map_error::MapError;
use crate::topology::cache::InvalidateCache;
use crate::topology::cells::CellCache;
use crate::topology::ids::{DartId, NULL_DART, VertexId};
use crate::topology::orbit::OrbitPolicy;
use crate::topology::relation::{Dimensionality, GrowthPolicy, MapConfig, Relation};
use crate::topology::validation::validate_tables;

/// Dart/vertex store of a 2D or 3D combinatorial map.
///
/// # Example
/// ```rust
/// use cmap_grid::prelude::*;
///
/// let mut map = CombinatorialMap::create(2, 4, 4)?;
/// let vs: Vec<_> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
///     .into_iter()
///     .map(|p| map.add_vertex(p))
///     .collect::<Result<_, _>>()?;
/// let ds: Vec<_> = vs.iter().map(|&v| map.add_dart(v)).collect::<Result<_, _>>()?;
/// for i in 0..4 {
///     map.link_next(ds[i], ds[(i + 1) % 4])?;
/// }
/// let face: Vec<_> = map.orbit(ds[0], OrbitPolicy::Face)?.collect::<Result<_, _>>()?;
/// assert_eq!(face, ds);
/// # Ok::<(), cmap_grid::map_error::MapError>(())
/// ```
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawTables", into = "RawTables")]
pub struct CombinatorialMap {
    dimensionality: Dimensionality,
    growth: GrowthPolicy,
    dart_capacity: usize,
    vertex_capacity: usize,
    betas: Vec<u32>,
    vertex_refs: Vec<u32>,
    vertices: VertexTable,
    cells: CellCache,
}

/// Growable table of a map, as named in capacity errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Table {
    Dart,
    Vertex,
}

impl Table {
    fn name(self) -> &'static str {
        match self {
            Table::Dart => "dart",
            Table::Vertex => "vertex",
        }
    }

    /// Largest number of entries whose ids fit `u32`. Darts lose row 0 to
    /// the null dart.
    fn id_limit(self) -> usize {
        match self {
            Table::Dart => u32::MAX as usize - 1,
            Table::Vertex => u32::MAX as usize,
        }
    }
}

/// Owned copy of a map's tables, used for import, export and serialization.
///
/// `betas` holds `vertex_refs.len()` rows of `dimensionality.stride()`
/// entries; row `0` and `vertex_refs[0]` belong to the null dart and must be
/// zero.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawTables {
    pub dimensionality: Dimensionality,
    pub betas: Vec<u32>,
    pub vertex_refs: Vec<u32>,
    pub vertices: VertexTable,
}

impl CombinatorialMap {
    /// Creates an empty fixed-capacity map.
    ///
    /// Fails with [`MapError::Configuration`] if `dimensionality` is neither
    /// 2 nor 3 or if a capacity is zero.
    pub fn create(
        dimensionality: usize,
        expected_dart_count: usize,
        expected_vertex_count: usize,
    ) -> Result<Self, MapError> {
        let dimensionality = Dimensionality::try_from(dimensionality)?;
        Self::with_config(MapConfig::fixed(
            dimensionality,
            expected_dart_count,
            expected_vertex_count,
        ))
    }

    /// Creates an empty growable map.
    pub fn new(dimensionality: Dimensionality) -> Self {
        Self::empty(MapConfig::adaptive(dimensionality, 0, 0))
    }

    /// Creates an empty map from an explicit configuration.
    pub fn with_config(config: MapConfig) -> Result<Self, MapError> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    fn empty(config: MapConfig) -> Self {
        let stride = config.dimensionality.stride();
        let mut betas = Vec::with_capacity((config.dart_capacity + 1) * stride);
        betas.resize(stride, NULL_DART);
        let mut vertex_refs = Vec::with_capacity(config.dart_capacity + 1);
        vertex_refs.push(0);
        Self {
            dimensionality: config.dimensionality,
            growth: config.growth,
            dart_capacity: config.dart_capacity,
            vertex_capacity: config.vertex_capacity,
            betas,
            vertex_refs,
            vertices: VertexTable::with_capacity(config.dimensionality, config.vertex_capacity),
            cells: CellCache::default(),
        }
    }

    /// Wraps tables filled by a generation kernel. The tables are trusted;
    /// invariants are asserted in debug builds only.
    pub(crate) fn from_generated(
        dimensionality: Dimensionality,
        betas: Vec<u32>,
        vertex_refs: Vec<u32>,
        vertices: VertexTable,
    ) -> Self {
        let map = Self {
            dimensionality,
            growth: GrowthPolicy::Adaptive,
            dart_capacity: vertex_refs.len() - 1,
            vertex_capacity: vertices.len(),
            betas,
            vertex_refs,
            vertices,
            cells: CellCache::default(),
        };
        map.debug_assert_invariants();
        map
    }

    /// Builds a map from externally produced tables after checking every
    /// structural invariant. The result is growable.
    pub fn from_raw_tables(raw: RawTables) -> Result<Self, MapError> {
        if raw.vertices.dimensionality() != raw.dimensionality {
            return Err(MapError::MalformedTables(format!(
                "{} map paired with a {} vertex table",
                raw.dimensionality,
                raw.vertices.dimensionality()
            )));
        }
        validate_tables(
            raw.dimensionality,
            &raw.betas,
            &raw.vertex_refs,
            raw.vertices.len(),
        )?;
        log::debug!(
            "imported {} map: {} darts, {} vertices",
            raw.dimensionality,
            raw.vertex_refs.len() - 1,
            raw.vertices.len()
        );
        Ok(Self {
            dimensionality: raw.dimensionality,
            growth: GrowthPolicy::Adaptive,
            dart_capacity: raw.vertex_refs.len() - 1,
            vertex_capacity: raw.vertices.len(),
            betas: raw.betas,
            vertex_refs: raw.vertex_refs,
            vertices: raw.vertices,
            cells: CellCache::default(),
        })
    }

    /// Copies the tables out.
    pub fn to_raw_tables(&self) -> RawTables {
        RawTables {
            dimensionality: self.dimensionality,
            betas: self.betas.clone(),
            vertex_refs: self.vertex_refs.clone(),
            vertices: self.vertices.clone(),
        }
    }

    /// Consumes the map and returns its tables.
    pub fn into_raw_tables(self) -> RawTables {
        RawTables {
            dimensionality: self.dimensionality,
            betas: self.betas,
            vertex_refs: self.vertex_refs,
            vertices: self.vertices,
        }
    }

    // ---------- sizes & accessors ----------

    #[inline]
    pub fn dimensionality(&self) -> Dimensionality {
        self.dimensionality
    }

    #[inline]
    pub fn growth(&self) -> GrowthPolicy {
        self.growth
    }

    /// Number of darts, excluding the null dart.
    #[inline]
    pub fn dart_count(&self) -> usize {
        self.vertex_refs.len() - 1
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// All issued darts in increasing order.
    pub fn darts(&self) -> impl Iterator<Item = DartId> + '_ {
        (1..self.vertex_refs.len() as u32).filter_map(DartId::from_raw)
    }

    /// All issued vertices in increasing order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = VertexId> + '_ {
        (0..self.vertices.len() as u32).map(VertexId::new)
    }

    /// Typed view of a 2D vertex table.
    pub fn vertices2(&self) -> Option<&[CuVertex2]> {
        match &self.vertices {
            VertexTable::Two(v) => Some(v),
            VertexTable::Three(_) => None,
        }
    }

    /// Typed view of a 3D vertex table.
    pub fn vertices3(&self) -> Option<&[CuVertex3]> {
        match &self.vertices {
            VertexTable::Three(v) => Some(v),
            VertexTable::Two(_) => None,
        }
    }

    pub fn vertex_table(&self) -> &VertexTable {
        &self.vertices
    }

    /// Flat beta table, `dimensionality().stride()` entries per row.
    #[inline]
    pub fn beta_table(&self) -> &[u32] {
        &self.betas
    }

    /// Vertex reference of every row, null dart included.
    #[inline]
    pub fn vertex_refs(&self) -> &[u32] {
        &self.vertex_refs
    }

    // ---------- checks ----------

    #[inline]
    pub fn contains_dart(&self, d: DartId) -> bool {
        d.index() < self.vertex_refs.len()
    }

    #[inline]
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        v.index() < self.vertices.len()
    }

    #[inline]
    fn check_dart(&self, d: DartId) -> Result<(), MapError> {
        if self.contains_dart(d) {
            Ok(())
        } else {
            Err(MapError::unknown_dart(d.get()))
        }
    }

    #[inline]
    fn check_vertex(&self, v: VertexId) -> Result<(), MapError> {
        if self.contains_vertex(v) {
            Ok(())
        } else {
            Err(MapError::unknown_vertex(v.get()))
        }
    }

    #[inline]
    pub(crate) fn beta_raw(&self, relation: Relation, d: u32) -> u32 {
        self.betas[d as usize * self.dimensionality.stride() + relation.beta_index()]
    }

    #[inline]
    fn set_beta_raw(&mut self, relation: Relation, d: u32, image: u32) {
        let stride = self.dimensionality.stride();
        self.betas[d as usize * stride + relation.beta_index()] = image;
    }

    // ---------- growth ----------

    /// Appends a vertex record and returns its id.
    ///
    /// Fails with [`MapError::DimensionMismatch`] if `position` does not match
    /// the map's dimensionality, and with [`MapError::CapacityExceeded`] if a
    /// fixed map is full.
    pub fn add_vertex(&mut self, position: impl Into<Position>) -> Result<VertexId, MapError> {
        let position = position.into();
        self.vertices.check_position(&position)?;
        self.check_room(Table::Vertex, self.vertices.len(), 1)?;
        let id = VertexId::new(self.vertices.len() as u32);
        self.vertices.push(position)?;
        Ok(id)
    }

    /// Appends several vertex records; either all are added or none.
    pub fn add_vertices<I, P>(&mut self, positions: I) -> Result<Vec<VertexId>, MapError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        let positions: Vec<Position> = positions.into_iter().map(Into::into).collect();
        for p in &positions {
            self.vertices.check_position(p)?;
        }
        self.check_room(Table::Vertex, self.vertices.len(), positions.len())?;
        let first = self.vertices.len() as u32;
        self.vertices.reserve(positions.len());
        for p in positions {
            self.vertices.push(p)?;
        }
        Ok((first..self.vertices.len() as u32).map(VertexId::new).collect())
    }

    /// Appends a dart starting at `vertex`, unlinked on every relation.
    pub fn add_dart(&mut self, vertex: VertexId) -> Result<DartId, MapError> {
        self.check_vertex(vertex)?;
        self.check_room(Table::Dart, self.dart_count(), 1)?;
        let id = DartId::new(self.vertex_refs.len() as u32)?;
        self.push_dart(vertex);
        Ok(id)
    }

    /// Appends one dart per vertex of `vertices`; either all are added or none.
    pub fn add_darts<I>(&mut self, vertices: I) -> Result<Vec<DartId>, MapError>
    where
        I: IntoIterator<Item = VertexId>,
    {
        let vertices: Vec<VertexId> = vertices.into_iter().collect();
        for &v in &vertices {
            self.check_vertex(v)?;
        }
        self.check_room(Table::Dart, self.dart_count(), vertices.len())?;
        let first = self.vertex_refs.len() as u32;
        let ids = (first..first + vertices.len() as u32)
            .map(DartId::new)
            .collect::<Result<Vec<_>, _>>()?;
        self.betas
            .reserve(vertices.len() * self.dimensionality.stride());
        self.vertex_refs.reserve(vertices.len());
        for v in vertices {
            self.push_dart(v);
        }
        Ok(ids)
    }

    fn push_dart(&mut self, vertex: VertexId) {
        let new_len = self.betas.len() + self.dimensionality.stride();
        self.betas.resize(new_len, NULL_DART);
        self.vertex_refs.push(vertex.get());
        self.invalidate_cache();
    }

    fn check_room(&self, table: Table, len: usize, additional: usize) -> Result<(), MapError> {
        let limit = match self.growth {
            GrowthPolicy::Fixed => match table {
                Table::Dart => self.dart_capacity,
                Table::Vertex => self.vertex_capacity,
            },
            GrowthPolicy::Adaptive => table.id_limit(),
        };
        match len.checked_add(additional) {
            Some(total) if total <= limit => Ok(()),
            _ => Err(MapError::CapacityExceeded {
                table: table.name(),
                capacity: limit,
            }),
        }
    }

    // ---------- linking ----------

    /// Links `a` and `b` through the edge involution (β2).
    ///
    /// Previous partners of `a` and `b` are unlinked. Linking a dart with
    /// itself leaves it unlinked, i.e. a fixed point of the involution.
    pub fn link_involution(&mut self, a: DartId, b: DartId) -> Result<(), MapError> {
        self.link(Relation::Involution, a, b)
    }

    /// Links `a` and `b` through the volume involution (β3); 3D maps only.
    pub fn link_volume_involution(&mut self, a: DartId, b: DartId) -> Result<(), MapError> {
        self.link(Relation::VolumeInvolution, a, b)
    }

    /// Makes `b` the next dart of `a` in their face (β1(a) = b, β0(b) = a).
    ///
    /// The former successor of `a` loses its predecessor and the former
    /// predecessor of `b` loses its successor.
    pub fn link_next(&mut self, a: DartId, b: DartId) -> Result<(), MapError> {
        self.link(Relation::Next, a, b)
    }

    /// Generic form of the link operations. `link(Previous, a, b)` is
    /// `link(Next, b, a)`.
    pub fn link(&mut self, relation: Relation, a: DartId, b: DartId) -> Result<(), MapError> {
        self.dimensionality.check(relation)?;
        self.check_dart(a)?;
        self.check_dart(b)?;
        self.link_raw(relation, a.get(), b.get());
        self.invalidate_cache();
        Ok(())
    }

    fn link_raw(&mut self, relation: Relation, a: u32, b: u32) {
        match relation {
            Relation::Next => self.link_permutation(a, b),
            Relation::Previous => self.link_permutation(b, a),
            Relation::Involution | Relation::VolumeInvolution => {
                self.link_self_inverse(relation, a, b)
            }
        }
    }

    fn link_permutation(&mut self, a: u32, b: u32) {
        let old_next = self.beta_raw(Relation::Next, a);
        if old_next != NULL_DART && old_next != b {
            self.set_beta_raw(Relation::Previous, old_next, NULL_DART);
        }
        let old_prev = self.beta_raw(Relation::Previous, b);
        if old_prev != NULL_DART && old_prev != a {
            self.set_beta_raw(Relation::Next, old_prev, NULL_DART);
        }
        self.set_beta_raw(Relation::Next, a, b);
        self.set_beta_raw(Relation::Previous, b, a);
    }

    fn link_self_inverse(&mut self, relation: Relation, a: u32, b: u32) {
        if a == b {
            self.unlink_raw(relation, a);
            return;
        }
        for (d, other) in [(a, b), (b, a)] {
            let old = self.beta_raw(relation, d);
            if old != NULL_DART && old != other {
                self.set_beta_raw(relation, old, NULL_DART);
            }
        }
        self.set_beta_raw(relation, a, b);
        self.set_beta_raw(relation, b, a);
    }

    /// Clears `relation` for `d` and the matching half on its partner.
    pub fn unlink(&mut self, relation: Relation, d: DartId) -> Result<(), MapError> {
        self.dimensionality.check(relation)?;
        self.check_dart(d)?;
        self.unlink_raw(relation, d.get());
        self.invalidate_cache();
        Ok(())
    }

    fn unlink_raw(&mut self, relation: Relation, d: u32) {
        let partner = self.beta_raw(relation, d);
        self.set_beta_raw(relation, d, NULL_DART);
        if partner != NULL_DART {
            self.set_beta_raw(relation.inverse(), partner, NULL_DART);
        }
    }

    // ---------- sewing ----------

    /// Links `a` and `b` like [`link`](Self::link), then merges the vertices
    /// the new link makes coincident.
    ///
    /// Through an involution, the dart after `a` must start where `b` starts
    /// and the dart after `b` where `a` starts. Through `Next`, every
    /// involution partner of `a` must start where `b` starts. Each such pair
    /// of vertices becomes the smaller of the two ids, moved to the average
    /// of both positions; the other record stays in the vertex table with no
    /// dart referencing it.
    ///
    /// # Example
    /// ```rust
    /// use cmap_grid::prelude::*;
    ///
    /// let mut map = CombinatorialMap::new(Dimensionality::Two);
    /// let v = map.add_vertices([(0.0, 0.0), (1.0, 0.0), (1.0, 0.2), (0.0, 0.0)])?;
    /// let d = map.add_darts(v.iter().copied())?;
    /// map.link_next(d[0], d[1])?;
    /// map.link_next(d[2], d[3])?;
    /// map.sew(Relation::Involution, d[0], d[2])?;
    /// assert_eq!(map.vertex_of(d[2])?, map.vertex_of(d[1])?);
    /// assert_eq!(map.position_of(v[1])?, Position::from((1.0, 0.1)));
    /// # Ok::<(), MapError>(())
    /// ```
    pub fn sew(&mut self, relation: Relation, a: DartId, b: DartId) -> Result<(), MapError> {
        self.dimensionality.check(relation)?;
        self.check_dart(a)?;
        self.check_dart(b)?;
        let pairs = self.coincident_pairs(relation, a.get(), b.get());
        self.link_raw(relation, a.get(), b.get());
        for (x, y) in pairs {
            self.merge_vertices(x, y);
        }
        self.invalidate_cache();
        Ok(())
    }

    /// Unlinks `d` on `relation` like [`unlink`](Self::unlink), then splits
    /// the vertices the link was holding together.
    ///
    /// For each vertex shared across the removed link, if the vertex orbit on
    /// the partner's side no longer reaches the other side, the darts of that
    /// orbit get a fresh copy of the vertex record. Unsewing an unlinked dart
    /// does nothing. On a fixed map without room for the new records this
    /// fails with [`MapError::CapacityExceeded`] and the link is kept.
    pub fn unsew(&mut self, relation: Relation, d: DartId) -> Result<(), MapError> {
        self.dimensionality.check(relation)?;
        self.check_dart(d)?;
        let (relation, a) = match relation {
            Relation::Previous => (Relation::Next, self.beta_raw(Relation::Previous, d.get())),
            r => (r, d.get()),
        };
        if a == NULL_DART {
            return Ok(());
        }
        let b = self.beta_raw(relation, a);
        if b == NULL_DART {
            return Ok(());
        }

        let pairs = self.coincident_pairs(relation, a, b);
        self.unlink_raw(relation, a);
        let splits = self.plan_splits(&pairs).and_then(|splits| {
            self.check_room(Table::Vertex, self.vertices.len(), splits.len())?;
            Ok(splits)
        });
        let splits = match splits {
            Ok(splits) => splits,
            Err(e) => {
                self.link_raw(relation, a, b);
                return Err(e);
            }
        };
        for darts in splits {
            let fresh = self.vertices.len() as u32;
            self.vertices.duplicate(self.vertex_refs[darts[0] as usize] as usize);
            for x in darts {
                self.vertex_refs[x as usize] = fresh;
            }
        }
        self.invalidate_cache();
        Ok(())
    }

    /// Dart pairs that must start at the same vertex once `a` and `b` are
    /// linked through `relation`. The first dart of a pair is on `b`'s side.
    fn coincident_pairs(&self, relation: Relation, a: u32, b: u32) -> Vec<(u32, u32)> {
        let linked = |&(x, y): &(u32, u32)| x != NULL_DART && y != NULL_DART;
        match relation {
            Relation::Previous => self.coincident_pairs(Relation::Next, b, a),
            Relation::Next => [Relation::Involution, Relation::VolumeInvolution]
                .into_iter()
                .filter(|&r| self.dimensionality.supports(r))
                .map(|r| (b, self.beta_raw(r, a)))
                .filter(linked)
                .collect(),
            _ if a == b => Vec::new(),
            Relation::Involution | Relation::VolumeInvolution => [
                (b, self.beta_raw(Relation::Next, a)),
                (self.beta_raw(Relation::Next, b), a),
            ]
            .into_iter()
            .filter(linked)
            .collect(),
        }
    }

    fn merge_vertices(&mut self, x: u32, y: u32) {
        let (vx, vy) = (self.vertex_refs[x as usize], self.vertex_refs[y as usize]);
        if vx == vy {
            return;
        }
        let (keep, gone) = (vx.min(vy), vx.max(vy));
        self.vertices.merge(keep as usize, gone as usize);
        for r in self.vertex_refs.iter_mut().skip(1) {
            if *r == gone {
                *r = keep;
            }
        }
    }

    /// Darts to move to a fresh vertex, one group per split.
    fn plan_splits(&self, pairs: &[(u32, u32)]) -> Result<Vec<Vec<u32>>, MapError> {
        let mut splits: Vec<Vec<u32>> = Vec::new();
        for &(x, y) in pairs {
            let vertex = self.vertex_refs[x as usize];
            if vertex != self.vertex_refs[y as usize] || splits.iter().any(|s| s.contains(&x)) {
                continue;
            }
            let start = DartId::from_raw(x).ok_or(MapError::unknown_dart(x))?;
            let orbit = self.orbit_darts(start, OrbitPolicy::Vertex)?;
            if orbit.iter().any(|d| d.get() == y) {
                continue;
            }
            splits.push(
                orbit
                    .into_iter()
                    .map(DartId::get)
                    .filter(|&d| self.vertex_refs[d as usize] == vertex)
                    .collect(),
            );
        }
        Ok(splits)
    }

    // ---------- queries ----------

    /// Raw image of `d` through `relation`; `None` when unlinked.
    pub fn partner(&self, d: DartId, relation: Relation) -> Result<Option<DartId>, MapError> {
        self.dimensionality.check(relation)?;
        self.check_dart(d)?;
        Ok(DartId::from_raw(self.beta_raw(relation, d.get())))
    }

    /// Whether `d` is unlinked on `relation`.
    pub fn is_free(&self, d: DartId, relation: Relation) -> Result<bool, MapError> {
        Ok(self.partner(d, relation)?.is_none())
    }

    /// Adjacent dart of `d` along `relation`.
    ///
    /// An unlinked dart is a fixed point of the involutions (a boundary
    /// dart). It has no image through `Next`/`Previous`, which is reported
    /// as [`MapError::MalformedTopology`]: the face through it cannot close.
    pub fn traverse(&self, d: DartId, relation: Relation) -> Result<DartId, MapError> {
        match self.partner(d, relation)? {
            Some(image) => Ok(image),
            None if relation.is_involution() => Ok(d),
            None => Err(MapError::MalformedTopology {
                start: d.get(),
                detail: format!("dart has no image through {relation}"),
            }),
        }
    }

    /// Vertex the dart starts at.
    pub fn vertex_of(&self, d: DartId) -> Result<VertexId, MapError> {
        self.check_dart(d)?;
        Ok(VertexId::new(self.vertex_refs[d.index()]))
    }

    pub fn position_of(&self, v: VertexId) -> Result<Position, MapError> {
        self.vertices
            .get(v.index())
            .ok_or(MapError::unknown_vertex(v.get()))
    }

    /// Replaces the record of `v` in place.
    pub fn set_position(
        &mut self,
        v: VertexId,
        position: impl Into<Position>,
    ) -> Result<(), MapError> {
        self.check_vertex(v)?;
        self.vertices.set(v.index(), position.into())
    }

    /// Darts starting at `v`, found by scanning the vertex references.
    pub fn darts_of_vertex(&self, v: VertexId) -> Result<Vec<DartId>, MapError> {
        self.check_vertex(v)?;
        Ok(self
            .vertex_refs
            .iter()
            .enumerate()
            .skip(1)
            .filter(|&(_, &r)| r == v.get())
            .filter_map(|(d, _)| DartId::from_raw(d as u32))
            .collect())
    }

    pub(crate) fn cell_cache(&self) -> &CellCache {
        &self.cells
    }
}

impl InvalidateCache for CombinatorialMap {
    #[inline]
    fn invalidate_cache(&mut self) {
        self.cells = CellCache::default();
    }
}

impl DebugInvariants for CombinatorialMap {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "CombinatorialMap");
    }

    fn validate_invariants(&self) -> Result<(), MapError> {
        validate_tables(
            self.dimensionality,
            &self.betas,
            &self.vertex_refs,
            self.vertices.len(),
        )
    }
}

impl TryFrom<RawTables> for CombinatorialMap {
    type Error = MapError;

    fn try_from(raw: RawTables) -> Result<Self, Self::Error> {
        CombinatorialMap::from_raw_tables(raw)
    }
}

impl From<CombinatorialMap> for RawTables {
    fn from(map: CombinatorialMap) -> Self {
        map.into_raw_tables()
    }
}

impl Default for CombinatorialMap {
    fn default() -> Self {
        Self::new(Dimensionality::default())
    }
}
