//! The ant turtle and its function map

use crate::color::ColorTag;
use crate::error::StepError;
use crate::function_map::{number_arg, Category, FunctionMap, Moved, StepArgs};
use antpath_core::Arg;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// ANT
// ============================================================================

/// Grid walker. Heading is in degrees, 0 along +x, positive towards +y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ant {
    pub x: i64,
    pub y: i64,
    pub angle: f64,
    /// Multiplier for draw distances, changed by `S:` operations.
    pub scale: f64,
    /// Every visited cell, starting with the spawn point.
    pub path: Vec<(i64, i64)>,
    pub stroke: ColorTag,
    pub alive: bool,
    /// Moves made so far.
    pub current_life: usize,
    /// The ant stops moving after this many moves.
    pub max_life: Option<usize>,
}

impl Ant {
    pub fn new(x: i64, y: i64) -> Self {
        Self {
            x,
            y,
            angle: 0.0,
            scale: 1.0,
            path: vec![(x, y)],
            stroke: ColorTag::default(),
            alive: true,
            current_life: 0,
            max_life: None,
        }
    }

    pub fn with_max_life(mut self, max_life: usize) -> Self {
        self.max_life = Some(max_life);
        self.alive = max_life > 0;
        self
    }

    /// Move `distance` cells along the current heading, rounding each axis
    /// to the nearest cell. Records the new cell if the position changed.
    pub fn advance(&mut self, distance: f64) -> Moved {
        if !self.alive || !distance.is_finite() {
            return None;
        }

        let radians = self.angle.to_radians();
        let new_x = self.x.saturating_add((distance * radians.cos()).round() as i64);
        let new_y = self.y.saturating_add((distance * radians.sin()).round() as i64);

        if new_x == self.x && new_y == self.y {
            return None;
        }

        self.x = new_x;
        self.y = new_y;
        self.current_life += 1;
        self.path.push((new_x, new_y));

        if self.max_life.is_some_and(|max| self.current_life >= max) {
            self.alive = false;
        }

        Some((new_x, new_y))
    }

    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }
}

impl Default for Ant {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

// ============================================================================
// ANT FUNCTION MAP
// ============================================================================

fn draw(ant: &mut Ant, arg: Option<&Arg>, args: &StepArgs) -> Result<Moved, StepError> {
    let amount = number_arg(arg)?;
    let distance = match args.distance {
        Some(distance) if distance != 0.0 => distance * amount,
        _ => amount * ant.scale,
    };
    Ok(ant.advance(distance))
}

fn turn(ant: &mut Ant, arg: Option<&Arg>, _: &StepArgs) -> Result<Moved, StepError> {
    ant.angle += number_arg(arg)?;
    Ok(None)
}

fn scale(ant: &mut Ant, arg: Option<&Arg>, _: &StepArgs) -> Result<Moved, StepError> {
    let factor = number_arg(arg)?;
    tracing::trace!(from = ant.scale, to = ant.scale * factor, "scale");
    ant.scale *= factor;
    Ok(None)
}

fn color(ant: &mut Ant, arg: Option<&Arg>, _: &StepArgs) -> Result<Moved, StepError> {
    let tag = match arg {
        Some(Arg::Ident(name)) | Some(Arg::Text(name)) => name.parse::<ColorTag>()?,
        Some(other) => return Err(StepError::UnknownColor(other.to_string())),
        None => return Err(StepError::MissingArgument),
    };
    ant.stroke = tag;
    Ok(None)
}

fn noop(_: &mut Ant, _: Option<&Arg>, _: &StepArgs) -> Result<Moved, StepError> {
    Ok(None)
}

static ANT_FUNCTION_MAP: Lazy<FunctionMap<Ant>> = Lazy::new(|| {
    let mut map = FunctionMap::new();
    map.insert("D", Category::Main, draw);
    map.insert("T", Category::Turn, turn);
    map.insert("S", Category::Scale, scale);
    map.insert("C", Category::Color, color);
    map.insert("A", Category::None, noop);
    map.insert("B", Category::None, noop);
    for synonym in ["D2", "DL", "DR"] {
        map.alias(synonym, "D");
    }
    map
});

/// The ant's dispatch table: `D`/`D2`/`DL`/`DR` draw, `T` turns, `S` scales,
/// `C` sets the stroke, `A`/`B` do nothing.
pub fn ant_function_map() -> &'static FunctionMap<Ant> {
    &ANT_FUNCTION_MAP
}
