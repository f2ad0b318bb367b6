//! # Visual Sprites
//!
//! A [`Sprite`] combines a [`Transform`] with a [`CostumeStack`] and keeps the
//! geometry of its rendered image in sync with both.
//!
//! The rendered image is composed in a fixed order: take the current costume,
//! scale it uniformly, rotate it by the negated heading, then center it on the
//! sprite's position. Changing costume, scale or angle re-runs the whole
//! composition; changing only the position just moves the bounds.

use crate::sprite::{Costume, CostumeStack, Transform};
use crate::StageResult;
use macroquad::prelude::{vec2, Rect, Vec2};

/// Geometry of a sprite's composed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedImage {
    /// Costume size after scaling, before rotation
    pub size: Vec2,
    /// Counterclockwise rotation in degrees (the negated heading)
    pub rotation: f32,
    /// Axis-aligned box of the rotated image, centered on the sprite
    pub bounds: Rect,
}

impl RenderedImage {
    /// Top-left corner of the unrotated, scaled image.
    pub fn origin(&self) -> Vec2 {
        self.bounds.center() - self.size / 2.0
    }
}

fn centered_rect(center: Vec2, size: Vec2) -> Rect {
    Rect::new(
        center.x - size.x / 2.0,
        center.y - size.y / 2.0,
        size.x,
        size.y,
    )
}

/// A positioned, orientable game object.
///
/// # Examples
///
/// ```
/// use macroquad::prelude::{vec2, Image, WHITE};
/// use stagehand::{Costume, Sprite};
///
/// let costume = Costume::from_image("box", Image::gen_image_color(10, 10, WHITE));
/// let mut sprite = Sprite::new(vec![costume]).with_position(50.0, 50.0);
/// sprite.set_size_to(200.0).unwrap();
/// sprite.turn_clockwise(90.0);
///
/// let center = sprite.bounds().center();
/// assert!((center.x - 50.0).abs() < 1e-3);
/// assert!((center.y - 50.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct Sprite {
    transform: Transform,
    costumes: CostumeStack,
    rendered: RenderedImage,
    revision: u64,
}

impl Sprite {
    /// Creates a sprite wearing its first costume, centered on the default
    /// 800x600 screen. A stage configured with another size does not move it;
    /// use [`Sprite::with_position`] to place it in a larger or smaller window.
    pub fn new(costumes: Vec<Costume>) -> Self {
        let mut sprite = Self {
            transform: Transform::default(),
            costumes: CostumeStack::new(costumes),
            rendered: RenderedImage {
                size: Vec2::ZERO,
                rotation: 0.0,
                bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
            },
            revision: 0,
        };
        sprite.recompose();
        sprite
    }

    /// Places the sprite before it is added to a stage.
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.go_to(x, y);
        self
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn costumes(&self) -> &CostumeStack {
        &self.costumes
    }

    /// The costume currently worn, `None` for an empty stack.
    pub fn costume(&self) -> Option<&Costume> {
        self.costumes.current()
    }

    pub fn rendered(&self) -> &RenderedImage {
        &self.rendered
    }

    pub fn bounds(&self) -> Rect {
        self.rendered.bounds
    }

    /// Number of full recompositions so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn x(&self) -> f32 {
        self.transform.position.x
    }

    pub fn y(&self) -> f32 {
        self.transform.position.y
    }

    pub fn center(&self) -> Vec2 {
        self.transform.position
    }

    pub fn width(&self) -> f32 {
        self.rendered.bounds.w
    }

    pub fn height(&self) -> f32 {
        self.rendered.bounds.h
    }

    pub fn angle(&self) -> f32 {
        self.transform.angle
    }

    pub fn scale(&self) -> f32 {
        self.transform.scale()
    }

    // Motion

    /// Moves `steps` pixels along the current heading.
    pub fn move_steps(&mut self, steps: f32) {
        let delta = self.transform.heading() * steps;
        self.change_x_by(delta.x);
        self.change_y_by(delta.y);
    }

    pub fn turn_clockwise(&mut self, degrees: f32) {
        self.point_in_direction(self.transform.angle + degrees);
    }

    pub fn turn_counterclockwise(&mut self, degrees: f32) {
        self.point_in_direction(self.transform.angle - degrees);
    }

    pub fn point_in_direction(&mut self, degrees: f32) {
        self.transform.angle = degrees;
        self.recompose();
    }

    /// Turns toward a point.
    ///
    /// The heading is `atan2(dx, dy)` with the arguments in that order, which
    /// is the stage's screen-space heading convention rather than the usual
    /// `atan2(dy, dx)`.
    pub fn point_towards(&mut self, x: f32, y: f32) {
        let dx = x - self.x();
        let dy = y - self.y();
        self.point_in_direction(dx.atan2(dy).to_degrees());
    }

    pub fn point_towards_sprite(&mut self, other: &Sprite) {
        self.point_towards(other.x(), other.y());
    }

    pub fn go_to(&mut self, x: f32, y: f32) {
        self.set_x_to(x);
        self.set_y_to(y);
    }

    pub fn go_to_sprite(&mut self, other: &Sprite) {
        self.go_to(other.x(), other.y());
    }

    pub fn change_x_by(&mut self, dx: f32) {
        self.set_x_to(self.x() + dx);
    }

    pub fn change_y_by(&mut self, dy: f32) {
        self.set_y_to(self.y() + dy);
    }

    pub fn set_x_to(&mut self, x: f32) {
        self.transform.position.x = x;
        self.recenter();
    }

    pub fn set_y_to(&mut self, y: f32) {
        self.transform.position.y = y;
        self.recenter();
    }

    // Looks

    /// Wears costume `number` (1-based), keeping the center in place.
    pub fn switch_costume_to(&mut self, number: usize) -> StageResult<()> {
        self.costumes.switch_to(number)?;
        self.recompose();
        Ok(())
    }

    /// Wears the next costume, wrapping after the last.
    pub fn next_costume(&mut self) -> StageResult<()> {
        self.costumes.advance()?;
        self.recompose();
        Ok(())
    }

    /// Size as a percentage of natural size.
    pub fn size_percent(&self) -> f32 {
        self.transform.scale() * 100.0
    }

    pub fn set_size_to(&mut self, percent: f32) -> StageResult<()> {
        self.transform.set_scale(percent / 100.0)?;
        self.recompose();
        Ok(())
    }

    pub fn change_size_by(&mut self, percent: f32) -> StageResult<()> {
        self.set_size_to(self.size_percent() + percent)
    }

    // Sensing

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.rendered.bounds.contains(point)
    }

    /// Axis-aligned overlap test against another sprite's bounds.
    pub fn touching(&self, other: &Sprite) -> bool {
        self.rendered.bounds.overlaps(&other.rendered.bounds)
    }

    fn recompose(&mut self) {
        let scaled = self.costumes.size() * self.transform.scale();
        let rotation = -self.transform.angle;
        let (sin, cos) = rotation.to_radians().sin_cos();
        let rotated = vec2(
            (scaled.x * cos).abs() + (scaled.y * sin).abs(),
            (scaled.x * sin).abs() + (scaled.y * cos).abs(),
        );

        self.rendered = RenderedImage {
            size: scaled,
            rotation,
            bounds: centered_rect(self.transform.position, rotated),
        };
        self.revision += 1;
    }

    fn recenter(&mut self) {
        let size = vec2(self.rendered.bounds.w, self.rendered.bounds.h);
        self.rendered.bounds = centered_rect(self.transform.position, size);
    }
}
