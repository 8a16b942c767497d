use crate::model::{Rect, Table, Zone, ZoneId};
use std::borrow::Borrow;

/// Group tables into zones by proximity.
///
/// A zone is a maximal set of tables connected by center-to-center distance
/// `<= threshold`. Seeds are taken in input order and a cluster keeps
/// absorbing any unclustered table close to any of its members until it
/// stops growing. The zone bounding box is the union of its tables expanded
/// by `padding`.
pub fn cluster_tables<T: Borrow<Table>>(tables: &[T], threshold: f64, padding: f64) -> Vec<Zone> {
    let tables: Vec<&Table> = tables.iter().map(Borrow::<Table>::borrow).collect();
    let centers: Vec<_> = tables.iter().map(|t| t.rect.center()).collect();
    let mut clustered = vec![false; tables.len()];
    let mut zones = Vec::new();

    for seed in 0..tables.len() {
        if clustered[seed] {
            continue;
        }
        clustered[seed] = true;
        let mut members = vec![seed];

        loop {
            let mut absorbed = false;
            for cand in 0..tables.len() {
                if clustered[cand] {
                    continue;
                }
                let near = members
                    .iter()
                    .any(|&m| centers[m].distance(centers[cand]) <= threshold);
                if near {
                    clustered[cand] = true;
                    members.push(cand);
                    absorbed = true;
                }
            }
            if !absorbed {
                break;
            }
        }

        // keep input order inside the zone
        members.sort_unstable();
        let bounds = members
            .iter()
            .map(|&i| tables[i].rect)
            .fold(tables[seed].rect, Rect::union)
            .expand(padding);

        zones.push(Zone {
            id: ZoneId(zones.len() as u32),
            tables: members.iter().map(|&i| tables[i].id).collect(),
            bounds,
        });
    }

    zones
}
