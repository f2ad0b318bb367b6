//! Integration test to ensure a stage can be assembled from config, assets and
//! a sprite factory.

use macroquad::prelude::*;
use stagehand::{
    Actor, FileImageLoader, Inert, InputBatch, LoopState, Sprite, SpriteFactory, Stage,
    StageConfig, StageError, StageResult, Surface,
};
use std::path::{Path, PathBuf};

struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self, _color: Color) {}
    fn blit_backdrop(&mut self, _costume: &stagehand::Costume) {}
    fn blit(&mut self, _costume: &stagehand::Costume, _placement: &stagehand::RenderedImage) {}
}

fn write_png(dir: &Path, name: &str, width: u16, height: u16) {
    let path = dir.join(name);
    Image::gen_image_color(width, height, PURPLE).export_png(path.to_str().unwrap());
}

fn demo_factory() -> StageResult<SpriteFactory> {
    let mut factory = SpriteFactory::new();
    factory.register("Rock", |loader| {
        let costumes = loader.load_all(&[PathBuf::from("rock.png")])?;
        Ok(Actor::new(Sprite::new(costumes), Inert))
    })?;
    factory.register("Bird", |loader| {
        let paths = [PathBuf::from("bird1.png"), PathBuf::from("bird2.png")];
        let costumes = loader.load_all(&paths)?;
        Ok(Actor::new(Sprite::new(costumes), Inert))
    })?;
    factory.register("Ghost", |_loader| Ok(Actor::new(Sprite::new(Vec::new()), Inert)))?;
    Ok(factory)
}

#[test]
fn test_basic_startup() -> StageResult<()> {
    let dir = tempfile::tempdir()?;
    write_png(dir.path(), "sky.png", 8, 6);
    write_png(dir.path(), "rock.png", 10, 10);
    write_png(dir.path(), "bird1.png", 12, 8);
    write_png(dir.path(), "bird2.png", 12, 9);

    let config = StageConfig {
        backdrops: vec![PathBuf::from("sky.png")],
        asset_root: dir.path().to_path_buf(),
        seed: Some(1),
        ..StageConfig::default()
    };
    let mut loader = FileImageLoader::new(config.asset_root.clone());
    let mut stage = Stage::from_config(config, &mut loader)?;
    assert_eq!(stage.backdrops().len(), 1);

    let ids = stage.populate(&demo_factory()?, &mut loader)?;
    assert_eq!(ids.len(), 3);
    for (k, id) in ids.iter().enumerate() {
        assert_eq!(stage.registry().layer_of(*id)?, k as i64);
    }

    let bird = stage.sprite(ids[1]).unwrap();
    assert_eq!(bird.costumes().len(), 2);
    assert_eq!((bird.width(), bird.height()), (12.0, 8.0));

    stage.begin();
    assert_eq!(
        stage.tick(&InputBatch::default(), &mut NullSurface),
        LoopState::Running
    );
    assert_eq!(stage.ticks(), 1);
    Ok(())
}

#[test]
fn test_missing_backdrop_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = StageConfig {
        backdrops: vec![PathBuf::from("missing.png")],
        asset_root: dir.path().to_path_buf(),
        ..StageConfig::default()
    };
    let mut loader = FileImageLoader::new(config.asset_root.clone());
    assert!(matches!(
        Stage::from_config(config, &mut loader),
        Err(StageError::AssetLoad { .. })
    ));
}

#[test]
fn test_missing_costume_aborts_population() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "rock.png", 10, 10);

    let mut loader = FileImageLoader::new(dir.path());
    let mut stage = Stage::new(StageConfig::default()).unwrap();
    let result = stage.populate(&demo_factory().unwrap(), &mut loader);

    assert!(matches!(result, Err(StageError::AssetLoad { .. })));
    // The rock was built before the bird failed.
    assert_eq!(stage.registry().len(), 1);
}

#[test]
fn test_factory_build_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let mut loader = FileImageLoader::new(dir.path());
    let factory = demo_factory().unwrap();

    assert_eq!(factory.names(), vec!["Rock", "Bird", "Ghost"]);
    let ghost = factory.build("Ghost", &mut loader).unwrap();
    assert!(ghost.sprite.costume().is_none());
    assert!(factory.build("Dragon", &mut loader).is_err());
}
