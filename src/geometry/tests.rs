use super::*;

#[test]
fn test_contains_interior_point() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    assert!(bbox.contains(5.0, 5.0));
    assert!(bbox.contains(0.0, 0.0)); // top-left corner is inside
}

#[test]
fn test_contains_excludes_far_edges() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    assert!(!bbox.contains(10.0, 5.0));
    assert!(!bbox.contains(5.0, 10.0));
    assert!(!bbox.contains(-0.1, 5.0));
}

#[test]
fn test_adjacent_boxes_never_share_a_point() {
    let left = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let right = BoundingBox::new(10.0, 0.0, 10.0, 10.0);

    assert!(!left.contains(10.0, 3.0));
    assert!(right.contains(10.0, 3.0));
    assert!(!left.overlaps(&right));
}

#[test]
fn test_overlaps() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(5.0, 5.0, 10.0, 10.0);
    let c = BoundingBox::new(20.0, 20.0, 1.0, 1.0);

    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
    assert!(!a.overlaps(&c));
}
