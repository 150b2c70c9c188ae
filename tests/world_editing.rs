use cgmath::{Point3, Vector3};
use voxel_octree::{
    BlockColor, BlockSide, BlockValue, BoundingBox, GenerationMethod, OctreeNode, Ray, World,
    WorldConfig, NO_VALUE,
};

const RED: BlockValue = 0xff0000;

fn config(generation: GenerationMethod) -> WorldConfig {
    WorldConfig {
        generation,
        seed: Some(42),
        ..WorldConfig::default()
    }
}

fn assert_canonical(node: &OctreeNode) {
    if node.is_leaf() {
        return;
    }
    let mut leaf_values = Vec::new();
    for (_, child) in node.children() {
        assert_canonical(child);
        assert!(
            !child.is_leaf() || child.value() != NO_VALUE,
            "empty leaf left in place"
        );
        if child.is_leaf() {
            leaf_values.push(child.value());
        }
    }
    let collapsible = leaf_values.len() == 8 && leaf_values.iter().all(|v| *v == leaf_values[0]);
    assert!(!collapsible, "eight equal leaves were not merged");
}

#[test]
fn writes_read_back_at_every_depth() {
    let mut world = World::empty(10.0);
    let mut rng = fastrand::Rng::with_seed(7);

    for i in 0..300 {
        let point = Point3::new(rng.f32() * 10.0, rng.f32() * 10.0, rng.f32() * 10.0);
        let dimension = rng.u32(0..=6);
        let value = BlockColor::get_random_color(&mut rng).value() + i % 2;

        world.set_block_at(point, dimension, value);
        assert_eq!(world.get_value_at(point), value, "write at {:?} dim {}", point, dimension);
        assert_canonical(world.root());
    }
}

#[test]
fn writes_outside_the_world_change_nothing() {
    let mut world = World::new(config(GenerationMethod::Starter));
    let before = world.root().clone();

    world.set_block_at(Point3::new(-0.01, 5.0, 5.0), 4, RED);
    world.set_block_at(Point3::new(5.0, 10.0, 5.0), 4, RED);
    world.set_block_at(Point3::new(5.0, 5.0, 12.0), 2, RED);
    world.set_block_at(Point3::new(f32::NAN, 5.0, 5.0), 2, RED);

    assert_eq!(world.root(), &before);
    assert_eq!(world.get_value_at(Point3::new(-0.01, 1.0, 1.0)), NO_VALUE);
}

#[test]
fn red_voxel_round_trip_restores_the_tree() {
    let mut world = World::new(config(GenerationMethod::Starter));
    let before = world.root().clone();

    world.set_block_at(Point3::new(5.0, 5.0, 5.0), 4, RED);
    assert_eq!(world.get_value_at(Point3::new(5.0, 5.0, 5.0)), RED);
    assert_eq!(world.get_block_at(Point3::new(5.0, 5.0, 5.0)).unwrap().dimension, 4);

    world.set_block_at(Point3::new(5.0, 5.0, 5.0), 4, NO_VALUE);
    assert_eq!(world.root(), &before);
}

#[test]
fn filling_a_region_collapses_it() {
    let mut world = World::empty(8.0);

    for x in [1.0, 3.0] {
        for y in [1.0, 3.0] {
            for z in [1.0, 3.0] {
                world.set_block_at(Point3::new(x, y, z), 2, RED);
            }
        }
    }

    // The lower -x -z corner of the world is now a single depth 1 leaf.
    let corner = world.root().child(6).unwrap();
    assert!(corner.is_leaf());
    assert_eq!(corner.value(), RED);
    assert_eq!(world.root().height(), 1);
    assert_eq!(world.root().node_count(), 2);
    assert_eq!(world.get_block_at(Point3::new(0.5, 3.5, 2.0)).unwrap().dimension, 1);
}

#[test]
fn ray_from_the_sky_lands_on_the_floor() {
    let world = World::new(config(GenerationMethod::Starter));
    let ray = Ray::new(Point3::new(2.5, 9.0, 2.5), Vector3::new(0.0, -1.0, 0.0));
    let hit = world.ray_cast(&ray, 4).unwrap();

    assert_eq!(hit.block.value(), BlockColor::BLUE.value());
    assert_eq!(hit.dimension, 1);
    assert_eq!(hit.previous_position, Point3::new(2.5, 5.0, 2.5));
    assert_eq!(hit.position.x, 2.5);
    assert!(hit.position.y < hit.previous_position.y);
}

#[test]
fn ray_across_the_sky_misses() {
    let world = World::new(config(GenerationMethod::Starter));
    let ray = Ray::new(Point3::new(0.5, 8.0, 0.5), Vector3::new(1.0, 0.0, 1.0));
    assert!(world.ray_cast(&ray, 4).is_none());
}

#[test]
fn placed_block_is_entered_from_the_side() {
    let mut world = World::empty(10.0);
    world.set_block_at(Point3::new(5.3, 5.3, 5.3), 4, RED);

    let ray = Ray::new(Point3::new(9.0, 5.3, 5.3), Vector3::new(-1.0, 0.0, 0.0));
    let hit = world.ray_cast(&ray, 4).unwrap();
    assert_eq!(hit.block.value(), RED);
    assert_eq!(hit.previous_position, Point3::new(5.625, 5.0, 5.0));
    assert_eq!(hit.hit_side(), Some(BlockSide::RIGHT));
}

#[test]
fn starter_floor_is_visible_and_solid() {
    let world = World::new(config(GenerationMethod::Starter));

    let mut leaves = Vec::new();
    world.visit_blocks(&mut |value: BlockValue, origin: Point3<f32>, size: f32| {
        leaves.push((value, origin, size));
    });
    assert_eq!(leaves.len(), 4);
    for (value, origin, size) in &leaves {
        assert_eq!(*size, 5.0);
        assert_eq!(origin.y, 0.0);
        assert_eq!(world.get_value_at(*origin), *value);
    }

    assert_eq!(world.collect_collision_boxes().len(), 4);
    assert_eq!(world.collect_instances().len(), 4);

    let standing = BoundingBox::from_center(Point3::new(3.0, 5.5, 3.0), Vector3::new(0.5, 1.8, 0.5));
    let flying = BoundingBox::from_center(Point3::new(3.0, 8.0, 3.0), Vector3::new(0.5, 1.8, 0.5));
    assert!(world.intersects(&standing));
    assert!(!world.intersects(&flying));
}

#[test]
fn seeded_generation_is_repeatable_and_canonical() {
    for method in [
        GenerationMethod::Random,
        GenerationMethod::Perlin,
        GenerationMethod::Fractal,
    ] {
        let first = World::new(config(method));
        let second = World::new(config(method));
        assert_eq!(first.root(), second.root(), "{:?}", method);
        assert_canonical(first.root());
    }

    let fractal = World::new(config(GenerationMethod::Fractal));
    assert!(!fractal.collect_instances().is_empty());
}

#[test]
fn config_file_drives_the_world() {
    let path = std::env::temp_dir().join("voxel_octree_world_editing_config.json");
    std::fs::write(
        &path,
        r#"{ "world_size": 16.0, "generation": "empty", "default_block_dimension": 2 }"#,
    )
    .unwrap();

    let config = WorldConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let mut world = World::new(config);
    assert_eq!(world.root(), &OctreeNode::default());
    assert_eq!(world.size_at_dimension(2), 4.0);

    world.set_block_at(Point3::new(15.0, 15.0, 15.0), 2, RED);
    assert_eq!(world.get_value_at(Point3::new(12.5, 12.5, 12.5)), RED);
    assert_eq!(world.get_value_at(Point3::new(11.5, 12.5, 12.5)), NO_VALUE);
}
