use std::f64::consts::PI;

const ROTATE_SPEED: f64 = 0.008;
const WHEEL_SPEED: f64 = 0.008;
const PINCH_SPEED: f64 = 0.05;
const MIN_DISTANCE: f64 = 12.0;
const MAX_DISTANCE: f64 = 60.0;
const INITIAL_DISTANCE: f64 = 30.0;
const INITIAL_POSITION: [f64; 3] = [18.0, 18.0, 18.0];
// Keeps the camera off the poles.
const POLAR_MARGIN: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitController {
    position: [f64; 3],
    distance: f64,
    dragging: bool,
    last_pointer: (f64, f64),
    pinch_distance: Option<f64>,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            position: INITIAL_POSITION,
            distance: INITIAL_DISTANCE,
            dragging: false,
            last_pointer: (0.0, 0.0),
            pinch_distance: None,
        }
    }
}

fn radius(p: [f64; 3]) -> f64 {
    (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt()
}

fn span(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (a.0 - b.0, a.1 - b.1);
    (dx * dx + dy * dy).sqrt()
}

impl OrbitController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> [f64; 3] {
        self.position
    }

    /// Target camera distance; the actual radius catches up on the next zoom.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.dragging = true;
        self.last_pointer = (x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if !self.dragging {
            return;
        }
        let (px, py) = self.last_pointer;
        self.rotate((x - px) * ROTATE_SPEED, (y - py) * ROTATE_SPEED);
        self.last_pointer = (x, y);
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.zoom_by(delta_y * WHEEL_SPEED);
    }

    pub fn touch_start(&mut self, touches: &[(f64, f64)]) {
        match touches {
            [only] => self.pointer_down(only.0, only.1),
            [a, b] => {
                self.dragging = false;
                self.pinch_distance = Some(span(*a, *b));
            }
            _ => {}
        }
    }

    pub fn touch_move(&mut self, touches: &[(f64, f64)]) {
        match touches {
            [only] => self.pointer_move(only.0, only.1),
            [a, b] => {
                let current = span(*a, *b);
                if let Some(previous) = self.pinch_distance {
                    self.zoom_by((previous - current) * PINCH_SPEED);
                }
                self.pinch_distance = Some(current);
            }
            _ => {}
        }
    }

    pub fn touch_end(&mut self) {
        self.dragging = false;
        self.pinch_distance = None;
    }

    pub fn rotate(&mut self, delta_theta: f64, delta_phi: f64) {
        let [x, y, z] = self.position;
        let r = radius(self.position);
        if r == 0.0 {
            return;
        }
        let theta = x.atan2(z) - delta_theta;
        let phi = ((y / r).clamp(-1.0, 1.0).acos() - delta_phi)
            .clamp(POLAR_MARGIN, PI - POLAR_MARGIN);

        self.position = [
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
            r * phi.sin() * theta.cos(),
        ];
    }

    fn zoom_by(&mut self, delta: f64) {
        self.distance = (self.distance + delta).clamp(MIN_DISTANCE, MAX_DISTANCE);
        let r = radius(self.position);
        if r == 0.0 {
            return;
        }
        let scale = self.distance / r;
        for c in &mut self.position {
            *c *= scale;
        }
    }
}
