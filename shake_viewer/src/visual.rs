use board_shake::common::SandboxConfig;
use board_shake::{Sandbox, Shape, Side};
use ggez::event::{self, EventHandler};
use ggez::glam::Vec2 as GVec2;
use ggez::graphics::{self, Color, DrawMode, DrawParam, Mesh, Text};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::{Context, GameError, GameResult};

const WINDOW_SIZE: f32 = 640.0;
const MARGIN: f32 = 32.0;
const SHAKE_STEP: i32 = 2;

struct MainState {
    sandbox: Sandbox,
    wall_thickness: f32,
    /// Pixels per world unit, chosen so the whole frame fits the window.
    scale: f32,
}

impl MainState {
    fn new(config: SandboxConfig) -> GameResult<MainState> {
        let wall_thickness = config.board.wall_thickness as f32;
        let span = 8.0 * config.board.cell_size as f32 + 2.0 * wall_thickness;
        let scale = (WINDOW_SIZE - 2.0 * MARGIN) / span;
        let sandbox = Sandbox::chess(config).map_err(to_game_error)?;
        Ok(MainState {
            sandbox,
            wall_thickness,
            scale,
        })
    }

    /// World is y-up, the screen is y-down.
    fn to_screen(&self, x: f64, y: f64) -> GVec2 {
        let offset = self.wall_thickness + MARGIN / self.scale;
        GVec2::new(
            (x as f32 + offset) * self.scale,
            WINDOW_SIZE - (y as f32 + offset) * self.scale,
        )
    }

    fn color_of(&self, index: usize) -> Color {
        let body = &self.sandbox.bodies()[index];
        if body.is_static() {
            return Color::from_rgb(110, 80, 50);
        }
        match self.sandbox.board().and_then(|b| b.piece(body.id)) {
            Some(handle) if handle.piece.side == Side::White => Color::from_rgb(235, 230, 215),
            Some(_) => Color::from_rgb(60, 60, 70),
            None => Color::WHITE,
        }
    }
}

impl EventHandler for MainState {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        let elapsed = ctx.time.delta().as_secs_f64();
        self.sandbox.advance(elapsed).map_err(to_game_error)?;
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, Color::from_rgb(30, 90, 60));

        // Draw each body
        for (index, body) in self.sandbox.bodies().iter().enumerate() {
            let color = self.color_of(index);
            match &body.shape {
                Shape::Circle(circle) => {
                    let circle_mesh = Mesh::new_circle(
                        ctx,
                        DrawMode::fill(),
                        GVec2::new(0.0, 0.0),
                        circle.radius as f32 * self.scale,
                        0.5,
                        color,
                    )?;
                    canvas.draw(
                        &circle_mesh,
                        DrawParam::new().dest(self.to_screen(body.position.x, body.position.y)),
                    );
                }
                Shape::Box(_) => {
                    let Some(corners) = body.world_vertices() else {
                        continue;
                    };
                    let screen_verts = corners.map(|v| self.to_screen(v.x, v.y));
                    let box_mesh = Mesh::new_polygon(ctx, DrawMode::fill(), &screen_verts, color)?;
                    canvas.draw(&box_mesh, DrawParam::new());
                }
            }
        }

        let status = if self.sandbox.is_paused() { "paused" } else { "running" };
        let hud = Text::new(format!(
            "intensity {}  {}  [space] shake  [backspace] calm  [r] reset  [p] pause",
            self.sandbox.intensity(),
            status
        ));
        canvas.draw(&hud, DrawParam::new().dest(GVec2::new(8.0, 8.0)).color(Color::WHITE));

        canvas.finish(ctx)?;
        Ok(())
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, _repeated: bool) -> GameResult {
        match input.keycode {
            Some(KeyCode::Space) => self.sandbox.disturb(SHAKE_STEP).map_err(to_game_error)?,
            Some(KeyCode::Back) => self.sandbox.disturb(-SHAKE_STEP).map_err(to_game_error)?,
            Some(KeyCode::R) => self.sandbox.reset(),
            Some(KeyCode::P) => {
                if self.sandbox.is_paused() {
                    self.sandbox.resume();
                } else {
                    self.sandbox.pause();
                }
            }
            Some(KeyCode::Escape) => ctx.request_quit(),
            _ => {}
        }
        Ok(())
    }
}

fn to_game_error(e: board_shake::PhysicsError) -> GameError {
    GameError::CustomError(e.to_string())
}

pub fn run_visual(config: SandboxConfig) -> GameResult {
    let cb = ggez::ContextBuilder::new("shake_viewer", "board_shake")
        .window_setup(ggez::conf::WindowSetup::default().title("Shake the board"))
        .window_mode(ggez::conf::WindowMode::default().dimensions(WINDOW_SIZE, WINDOW_SIZE));

    let (ctx, event_loop) = cb.build()?;
    let state = MainState::new(config)?;
    event::run(ctx, event_loop, state)
}
