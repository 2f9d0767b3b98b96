//! Zone-level connectivity derived from the masked collision store.
//!
//! Every allocated zone gets an exit mask: bit `d.index()` is set when some
//! walkable tile on the zone border can take a legal step in a direction
//! leading into the neighbouring zone `d`. Zones are open when they are land
//! (or the terrain filter is off), and open zones are split into connected
//! components. A tile path between two zones implies a zone path between
//! them, so differing components prove a destination unreachable.

use log::info;
use mapsquare_core::coord::{ZONE_SIZE, zone_base, zone_of};
use mapsquare_core::{Direction, LEVELS, Point, Range};
use mapsquare_paths::{PathRange, Pather};

use crate::store::CollisionStore;
use crate::terrain::TerrainClassifier;

/// Connectivity of the zones of one level.
#[derive(Debug, Clone)]
struct ZoneLayer {
    range: Range,
    exits: Vec<u8>,
    open: Vec<bool>,
    components: PathRange,
    component_count: usize,
}

impl ZoneLayer {
    fn empty() -> Self {
        Self {
            range: Range::default(),
            exits: Vec::new(),
            open: Vec::new(),
            components: PathRange::new(Range::default()),
            component_count: 0,
        }
    }

    #[inline]
    fn idx(&self, zone: Point) -> Option<usize> {
        if !self.range.contains(zone) {
            return None;
        }
        let w = self.range.width() as usize;
        let x = (zone.x - self.range.min.x) as usize;
        let z = (zone.z - self.range.min.z) as usize;
        Some(z * w + x)
    }

    #[inline]
    fn exits(&self, zone: Point) -> u8 {
        self.idx(zone).map_or(0, |i| self.exits[i])
    }

    #[inline]
    fn is_open(&self, zone: Point) -> bool {
        self.idx(zone).is_some_and(|i| self.open[i])
    }
}

/// Moves between open zones along their exits.
struct LayerPather<'a> {
    layer: &'a ZoneLayer,
}

impl Pather for LayerPather<'_> {
    fn neighbors(&self, zone: Point, buf: &mut Vec<Point>) {
        let bits = self.layer.exits(zone);
        if bits == 0 {
            return;
        }
        for d in Direction::ALL {
            if bits & (1 << d.index()) == 0 {
                continue;
            }
            let n = zone + d.offset();
            if self.layer.is_open(n) {
                buf.push(n);
            }
        }
    }
}

/// Zone-level connectivity for every level.
#[derive(Debug, Clone)]
pub struct ZoneGraph {
    layers: Vec<ZoneLayer>,
}

impl ZoneGraph {
    /// Derive exits, land classification and components from `store`.
    pub fn build(store: &CollisionStore, classifier: &TerrainClassifier, terrain_filter: bool) -> Self {
        let mut bounds = vec![Range::default(); LEVELS as usize];
        for (level, zone) in store.zones() {
            let b = &mut bounds[level as usize];
            *b = b.union(Range::new(zone.x, zone.z, zone.x + 1, zone.z + 1));
        }

        let mut layers = Vec::with_capacity(LEVELS as usize);
        for (level, range) in bounds.into_iter().enumerate() {
            let level = level as u8;
            if range.is_empty() {
                layers.push(ZoneLayer::empty());
                continue;
            }
            let len = range.len();
            let mut layer = ZoneLayer {
                range,
                exits: vec![0; len],
                open: vec![false; len],
                components: PathRange::new(range),
                component_count: 0,
            };

            for zone in range {
                if !store.zone_allocated(level, zone) {
                    continue;
                }
                let Some(i) = layer.idx(zone) else {
                    continue;
                };
                layer.exits[i] = zone_exits(store, level, zone);
                layer.open[i] = !terrain_filter || classifier.is_zone_land(store, level, zone);
            }

            // Tile steps are symmetric, but keep the mask symmetric regardless
            // so components never depend on the direction of traversal.
            for zone in range {
                let bits = layer.exits(zone);
                for d in Direction::ALL {
                    if bits & (1 << d.index()) == 0 {
                        continue;
                    }
                    if let Some(j) = layer.idx(zone + d.offset()) {
                        layer.exits[j] |= 1 << d.opposite().index();
                    }
                }
            }

            let mut components = std::mem::replace(&mut layer.components, PathRange::new(Range::default()));
            let pather = LayerPather { layer: &layer };
            let count = components.cc_map_all(&pather, |z| layer.is_open(z));
            layer.components = components;
            layer.component_count = count;

            info!(
                "zone graph level {level}: {} zones in {range}, {} open, {count} components",
                store.zones().filter(|&(l, _)| l == level).count(),
                layer.open.iter().filter(|&&o| o).count(),
            );
            layers.push(layer);
        }
        Self { layers }
    }

    #[inline]
    fn layer(&self, level: u8) -> Option<&ZoneLayer> {
        self.layers.get(level as usize)
    }

    /// Bounding range, in zone coordinates, of the allocated zones of `level`.
    pub fn bounds(&self, level: u8) -> Range {
        self.layer(level).map_or(Range::default(), |l| l.range)
    }

    /// Exit mask of `zone`, one bit per [`Direction::index`].
    pub fn exits(&self, level: u8, zone: Point) -> u8 {
        self.layer(level).map_or(0, |l| l.exits(zone))
    }

    /// Whether `zone` may be routed through: allocated, and land unless the
    /// terrain filter is disabled.
    pub fn is_open(&self, level: u8, zone: Point) -> bool {
        self.layer(level).is_some_and(|l| l.is_open(zone))
    }

    /// Connected component of an open zone.
    pub fn component(&self, level: u8, zone: Point) -> Option<usize> {
        self.layer(level)?.components.cc_at(zone)
    }

    /// Number of components on `level`.
    pub fn component_count(&self, level: u8) -> usize {
        self.layer(level).map_or(0, |l| l.component_count)
    }

    /// Whether open zones `a` and `b` are provably disconnected. Zones that
    /// are not open carry no component and never compare as disconnected.
    pub fn disconnected(&self, level: u8, a: Point, b: Point) -> bool {
        match (self.component(level, a), self.component(level, b)) {
            (Some(ca), Some(cb)) => ca != cb,
            _ => false,
        }
    }

    /// A [`Pather`] over the open zones of `level`, or `None` for a level
    /// without zones.
    pub fn pather(&self, level: u8) -> Option<impl Pather + '_> {
        let layer = self.layer(level)?;
        (!layer.range.is_empty()).then_some(LayerPather { layer })
    }
}

/// Exit bits of a single zone.
fn zone_exits(store: &CollisionStore, level: u8, zone: Point) -> u8 {
    let base = zone_base(zone);
    let mut bits = 0u8;
    for lz in 0..ZONE_SIZE {
        for lx in 0..ZONE_SIZE {
            let border = lx == 0 || lz == 0 || lx == ZONE_SIZE - 1 || lz == ZONE_SIZE - 1;
            if !border {
                continue;
            }
            let p = base.shift(lx, lz);
            if !store.is_tile_walkable(level, p.x, p.z) {
                continue;
            }
            for d in Direction::ALL {
                let to = zone_of(p + d.offset());
                if to == zone {
                    continue;
                }
                let Some(zd) = Direction::from_offset(to - zone) else {
                    continue;
                };
                if bits & (1 << zd.index()) == 0 && store.can_step(level, p, d) {
                    bits |= 1 << zd.index();
                }
            }
        }
    }
    bits
}
