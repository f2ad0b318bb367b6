//! # Demo Sprites
//!
//! A small cast that exercises the stage: a keyboard-driven cat, a bouncing
//! ball that splits when clicked, and a sign that hides and shows itself.

use macroquad::prelude::*;
use stagehand::{
    Actor, Behavior, Costume, Sprite, SpriteContext, SpriteFactory, StageResult,
};

fn block(name: &str, width: u16, height: u16, color: Color) -> Costume {
    Costume::from_image(name, Image::gen_image_color(width, height, color))
}

/// Registers the demo cast in draw order.
pub fn factory() -> StageResult<SpriteFactory> {
    let mut factory = SpriteFactory::new();
    factory.register("Sign", |_loader| {
        let sprite =
            Sprite::new(vec![block("sign", 160, 40, DARKGREEN)]).with_position(100.0, 40.0);
        Ok(Actor::new(sprite, Sign))
    })?;
    factory.register("Ball", |_loader| {
        let sprite =
            Sprite::new(vec![block("ball", 24, 24, RED)]).with_position(200.0, 200.0);
        Ok(Actor::new(sprite, Ball { speed: 6.0 }))
    })?;
    factory.register("Cat", |_loader| {
        let sprite = Sprite::new(vec![
            block("cat-a", 48, 32, ORANGE),
            block("cat-b", 48, 32, GOLD),
        ]);
        Ok(Actor::new(sprite, Cat))
    })?;
    Ok(factory)
}

/// Arrow keys steer, space cycles costumes, g/s grow and shrink, f/b move
/// a layer, holding w chases the pointer. Clicking brings it to the front.
struct Cat;

impl Behavior for Cat {
    fn on_key_pressed(&mut self, key: char, ctx: &mut SpriteContext<'_>) -> StageResult<()> {
        match key {
            'f' => return ctx.go_forward_layers(1),
            'b' => return ctx.go_backward_layers(1),
            _ => {}
        }

        let sprite = ctx.sprite_mut()?;
        match key {
            '↑' => sprite.move_steps(20.0),
            '↓' => sprite.move_steps(-20.0),
            '←' => sprite.turn_counterclockwise(15.0),
            '→' => sprite.turn_clockwise(15.0),
            ' ' => sprite.next_costume()?,
            'g' => sprite.change_size_by(10.0)?,
            's' => sprite.change_size_by(-10.0)?,
            _ => {}
        }
        Ok(())
    }

    fn on_clicked(&mut self, ctx: &mut SpriteContext<'_>) -> StageResult<()> {
        ctx.bring_to_front()
    }

    fn on_update(&mut self, ctx: &mut SpriteContext<'_>) -> StageResult<()> {
        if ctx.is_key_down('w')? {
            ctx.point_towards_mouse_pointer()?;
            ctx.sprite_mut()?.move_steps(4.0);
        }
        Ok(())
    }
}

/// Travels along its heading, bouncing off the viewport edges.
struct Ball {
    speed: f32,
}

impl Behavior for Ball {
    fn on_update(&mut self, ctx: &mut SpriteContext<'_>) -> StageResult<()> {
        let viewport = ctx.viewport();
        let sprite = ctx.sprite_mut()?;
        sprite.move_steps(self.speed);

        let bounds = sprite.bounds();
        let angle = sprite.angle();
        if bounds.left() < 0.0 || bounds.right() > viewport.x {
            sprite.point_in_direction(180.0 - angle);
        } else if bounds.top() < 0.0 || bounds.bottom() > viewport.y {
            sprite.point_in_direction(-angle);
        }
        Ok(())
    }

    fn on_clicked(&mut self, ctx: &mut SpriteContext<'_>) -> StageResult<()> {
        ctx.clone_self(Ball {
            speed: self.speed * 0.8,
        })?;
        Ok(())
    }

    fn on_clone_spawned(&mut self, ctx: &mut SpriteContext<'_>) -> StageResult<()> {
        ctx.go_to_random_position()?;
        ctx.sprite_mut()?.turn_clockwise(37.0);
        Ok(())
    }
}

/// 'h' toggles visibility; still hears keys while hidden.
struct Sign;

impl Behavior for Sign {
    fn on_key_pressed(&mut self, key: char, ctx: &mut SpriteContext<'_>) -> StageResult<()> {
        if key == 'h' {
            if ctx.is_hidden()? {
                ctx.show()?;
            } else {
                ctx.hide()?;
            }
        }
        if key == 'n' && ctx.backdrop_count() > 0 {
            ctx.next_backdrop()?;
        }
        Ok(())
    }
}
