//! Candidate-box clustering shared by detection backends.
//!
//! Raw detector output contains many near-duplicate boxes per true
//! feature; union-find clustering by IoU turns them into neighbor groups,
//! whose sizes drive the min-neighbors policy.

/// One raw candidate box in image coordinates, corners inclusive-exclusive.
#[derive(Clone, Debug, PartialEq)]
pub struct RawBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub score: f64,
}

/// IoU between two candidate boxes.
pub fn bbox_iou(a: &RawBox, b: &RawBox) -> f64 {
    let x1 = a.x1.max(b.x1);
    let y1 = a.y1.max(b.y1);
    let x2 = a.x2.min(b.x2);
    let y2 = a.y2.min(b.y2);

    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    if inter == 0.0 {
        return 0.0;
    }

    let area_a = (a.x2 - a.x1) * (a.y2 - a.y1);
    let area_b = (b.x2 - b.x1) * (b.y2 - b.y1);
    inter / (area_a + area_b - inter)
}

/// Find root of element `i` with path halving.
fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Merge the sets containing `a` and `b`.
fn union(parent: &mut [usize], a: usize, b: usize) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        parent[ra] = rb;
    }
}

/// Group candidates whose pairwise IoU exceeds `iou_thresh`.
///
/// Groups come back ordered by the index of their first member, so output
/// is deterministic for a given input order.
pub fn cluster_boxes(boxes: &[RawBox], iou_thresh: f64) -> Vec<Vec<RawBox>> {
    let mut parent: Vec<usize> = (0..boxes.len()).collect();

    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            if bbox_iou(&boxes[i], &boxes[j]) > iou_thresh {
                union(&mut parent, i, j);
            }
        }
    }

    let mut groups: std::collections::HashMap<usize, Vec<usize>> =
        std::collections::HashMap::new();
    for i in 0..boxes.len() {
        let root = find(&mut parent, i);
        groups.entry(root).or_default().push(i);
    }

    let mut ordered: Vec<Vec<usize>> = groups.into_values().collect();
    ordered.sort_by_key(|members| members[0]);
    ordered
        .into_iter()
        .map(|members| members.into_iter().map(|i| boxes[i].clone()).collect())
        .collect()
}

/// Mean box of a cluster; score is the cluster maximum.
pub fn mean_box(cluster: &[RawBox]) -> RawBox {
    let n = cluster.len() as f64;
    RawBox {
        x1: cluster.iter().map(|b| b.x1).sum::<f64>() / n,
        y1: cluster.iter().map(|b| b.y1).sum::<f64>() / n,
        x2: cluster.iter().map(|b| b.x2).sum::<f64>() / n,
        y2: cluster.iter().map(|b| b.y2).sum::<f64>() / n,
        score: cluster.iter().map(|b| b.score).fold(0.0, f64::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn raw(x1: f64, y1: f64, x2: f64, y2: f64) -> RawBox {
        RawBox {
            x1,
            y1,
            x2,
            y2,
            score: 0.9,
        }
    }

    #[test]
    fn test_iou_no_overlap() {
        assert_relative_eq!(
            bbox_iou(&raw(0.0, 0.0, 10.0, 10.0), &raw(20.0, 20.0, 30.0, 30.0)),
            0.0
        );
    }

    #[test]
    fn test_iou_identical() {
        let a = raw(0.0, 0.0, 10.0, 10.0);
        assert_relative_eq!(bbox_iou(&a, &a), 1.0);
    }

    #[test]
    fn test_iou_partial() {
        let a = raw(0.0, 0.0, 10.0, 10.0);
        let b = raw(5.0, 5.0, 15.0, 15.0);
        assert_relative_eq!(bbox_iou(&a, &b), 25.0 / 175.0);
    }

    #[test]
    fn test_overlapping_boxes_form_one_cluster() {
        let boxes = vec![
            raw(0.0, 0.0, 100.0, 100.0),
            raw(5.0, 5.0, 105.0, 105.0),
            raw(300.0, 300.0, 350.0, 350.0),
        ];
        let clusters = cluster_boxes(&boxes, 0.4);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].len(), 2);
        assert_eq!(clusters[1].len(), 1);
    }

    #[test]
    fn test_transitive_chaining() {
        // a overlaps b, b overlaps c, a barely overlaps c: still one group.
        let boxes = vec![
            raw(0.0, 0.0, 100.0, 100.0),
            raw(40.0, 0.0, 140.0, 100.0),
            raw(80.0, 0.0, 180.0, 100.0),
        ];
        let clusters = cluster_boxes(&boxes, 0.3);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster_boxes(&[], 0.4).is_empty());
    }

    #[test]
    fn test_mean_box_averages_corners() {
        let cluster = vec![
            RawBox {
                x1: 0.0,
                y1: 0.0,
                x2: 10.0,
                y2: 10.0,
                score: 0.6,
            },
            RawBox {
                x1: 4.0,
                y1: 2.0,
                x2: 14.0,
                y2: 12.0,
                score: 0.8,
            },
        ];
        let mean = mean_box(&cluster);
        assert_relative_eq!(mean.x1, 2.0);
        assert_relative_eq!(mean.y1, 1.0);
        assert_relative_eq!(mean.x2, 12.0);
        assert_relative_eq!(mean.y2, 11.0);
        assert_relative_eq!(mean.score, 0.8);
    }
}
