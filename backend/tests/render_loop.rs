use backend::math::Vec2;
use backend::render_loop::{Mesh, Program, Surface, ViewportSize, RESOLUTION_UNIFORM, TIME_UNIFORM};
use backend::{LoopState, RenderLoop, UniformLocation};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Clear,
    Activate,
    SetVec2(UniformLocation, f32, f32),
    SetF32(UniformLocation, f32),
    Bind,
    Draw(usize),
    Swap,
    Poll,
    Release(&'static str),
}

type CallLog = Rc<RefCell<Vec<Call>>>;

struct FakeSurface {
    log: CallLog,
    /// `should_close` answers false this many times, then true.
    open_for: Option<usize>,
    queries: Cell<usize>,
}

impl Surface for FakeSurface {
    fn should_close(&self) -> bool {
        let n = self.queries.get();
        self.queries.set(n + 1);
        self.open_for.is_some_and(|open_for| n >= open_for)
    }

    fn clear(&mut self) {
        self.log.borrow_mut().push(Call::Clear);
    }

    fn swap_buffers(&mut self) {
        self.log.borrow_mut().push(Call::Swap);
    }

    fn poll_events(&mut self) {
        self.log.borrow_mut().push(Call::Poll);
    }

    fn viewport(&self) -> ViewportSize {
        ViewportSize {
            width: 800,
            height: 600,
        }
    }
}

impl Drop for FakeSurface {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Call::Release("surface"));
    }
}

struct FakeProgram {
    log: CallLog,
    uniforms: Vec<&'static str>,
}

impl Program for FakeProgram {
    fn activate(&self) {
        self.log.borrow_mut().push(Call::Activate);
    }

    fn uniform_location(&self, name: &str) -> UniformLocation {
        match self.uniforms.iter().position(|u| *u == name) {
            Some(i) => UniformLocation::from_raw(i as i32),
            None => UniformLocation::INVALID,
        }
    }

    fn set_vec2(&self, location: UniformLocation, x: f32, y: f32) {
        if location.is_valid() {
            self.log.borrow_mut().push(Call::SetVec2(location, x, y));
        }
    }

    fn set_f32(&self, location: UniformLocation, value: f32) {
        if location.is_valid() {
            self.log.borrow_mut().push(Call::SetF32(location, value));
        }
    }
}

impl Drop for FakeProgram {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Call::Release("program"));
    }
}

struct FakeMesh {
    log: CallLog,
}

impl Mesh for FakeMesh {
    fn bind(&self) {
        self.log.borrow_mut().push(Call::Bind);
    }

    fn index_count(&self) -> usize {
        6
    }

    fn draw_indexed(&self, index_count: usize) {
        self.log.borrow_mut().push(Call::Draw(index_count));
    }
}

impl Drop for FakeMesh {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Call::Release("mesh"));
    }
}

fn terrain_loop(
    open_for: Option<usize>,
    uniforms: &[&'static str],
) -> (RenderLoop<FakeSurface, FakeProgram, FakeMesh>, CallLog) {
    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    let surface = FakeSurface {
        log: log.clone(),
        open_for,
        queries: Cell::new(0),
    };
    let program = FakeProgram {
        log: log.clone(),
        uniforms: uniforms.to_vec(),
    };
    let mesh = FakeMesh { log: log.clone() };
    (RenderLoop::new(surface, program, mesh), log)
}

fn time_values(log: &CallLog) -> Vec<f32> {
    log.borrow()
        .iter()
        .filter_map(|c| match c {
            Call::SetF32(_, v) => Some(*v),
            _ => None,
        })
        .collect()
}

#[test]
fn three_frames_then_close() {
    let (mut render_loop, log) = terrain_loop(Some(3), &[RESOLUTION_UNIFORM, TIME_UNIFORM]);
    assert_eq!(render_loop.state(), LoopState::Running);

    let summary = render_loop.run();
    assert_eq!(summary.frames, 3);
    assert_eq!(render_loop.state(), LoopState::Terminated);

    let calls = log.borrow();
    let (frames, teardown) = calls.split_at(calls.len() - 3);
    assert_eq!(
        teardown,
        &[
            Call::Release("mesh"),
            Call::Release("program"),
            Call::Release("surface")
        ]
    );

    assert_eq!(frames.len(), 3 * 8);
    for frame in frames.chunks(8) {
        assert_eq!(frame[0], Call::Clear);
        assert_eq!(frame[1], Call::Activate);
        assert_eq!(
            frame[2],
            Call::SetVec2(UniformLocation::from_raw(0), 800.0, 600.0)
        );
        assert!(matches!(frame[3], Call::SetF32(loc, _) if loc == UniformLocation::from_raw(1)));
        assert_eq!(frame[4..], [Call::Bind, Call::Draw(6), Call::Swap, Call::Poll]);
    }
}

#[test]
fn time_is_seconds_since_loop_start() {
    let started = Instant::now();
    let (mut render_loop, log) = terrain_loop(None, &[RESOLUTION_UNIFORM, TIME_UNIFORM]);

    let first = render_loop.frame().unwrap();
    std::thread::sleep(Duration::from_millis(30));
    let second = render_loop.frame().unwrap();
    std::thread::sleep(Duration::from_millis(30));
    let third = render_loop.frame().unwrap();
    let bound = started.elapsed().as_secs_f32();

    assert!(first.time.elapsed >= 0.0);
    assert!(second.time.elapsed - first.time.elapsed >= 0.029);
    assert!(third.time.elapsed - second.time.elapsed >= 0.029);
    assert!(third.time.elapsed <= bound);
    assert_eq!(
        [first.time.frame_index, second.time.frame_index, third.time.frame_index],
        [0, 1, 2]
    );

    let pushed = time_values(&log);
    assert_eq!(
        pushed,
        vec![first.time.elapsed, second.time.elapsed, third.time.elapsed]
    );
}

#[test]
fn time_never_decreases_and_resolution_is_fixed() {
    let (mut render_loop, log) = terrain_loop(None, &[RESOLUTION_UNIFORM, TIME_UNIFORM]);
    for _ in 0..50 {
        let uniforms = render_loop.frame().unwrap();
        assert_eq!(uniforms.resolution, Vec2::new(800.0, 600.0));
    }

    let times = time_values(&log);
    assert_eq!(times.len(), 50);
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn missing_time_uniform_is_skipped() {
    let (mut render_loop, log) = terrain_loop(Some(1), &[RESOLUTION_UNIFORM]);
    let summary = render_loop.run();
    assert_eq!(summary.frames, 1);

    let calls = log.borrow();
    assert!(time_values(&log).is_empty());
    assert!(calls.contains(&Call::Draw(6)));
    assert!(calls.contains(&Call::SetVec2(UniformLocation::from_raw(0), 800.0, 600.0)));
}

#[test]
fn program_without_uniforms_still_draws() {
    let (mut render_loop, log) = terrain_loop(Some(2), &[]);
    render_loop.run();

    let calls = log.borrow();
    let draws = calls.iter().filter(|c| **c == Call::Draw(6)).count();
    assert_eq!(draws, 2);
    assert!(!calls
        .iter()
        .any(|c| matches!(c, Call::SetF32(..) | Call::SetVec2(..))));
}

#[test]
fn closed_surface_renders_nothing() {
    let (mut render_loop, log) = terrain_loop(Some(0), &[RESOLUTION_UNIFORM, TIME_UNIFORM]);
    let summary = render_loop.run();

    assert_eq!(summary.frames, 0);
    assert_eq!(summary.elapsed, 0.0);
    assert_eq!(
        *log.borrow(),
        vec![
            Call::Release("mesh"),
            Call::Release("program"),
            Call::Release("surface")
        ]
    );
}

#[test]
fn frame_limit_ends_loop() {
    let (render_loop, log) = terrain_loop(None, &[RESOLUTION_UNIFORM, TIME_UNIFORM]);
    let mut render_loop = render_loop.with_max_frames(Some(5));
    let summary = render_loop.run();

    assert_eq!(summary.frames, 5);
    let draws = log.borrow().iter().filter(|c| **c == Call::Draw(6)).count();
    assert_eq!(draws, 5);
    assert_eq!(log.borrow().last(), Some(&Call::Release("surface")));
}

#[test]
fn terminated_loop_does_not_render() {
    let (mut render_loop, log) = terrain_loop(Some(1), &[RESOLUTION_UNIFORM, TIME_UNIFORM]);
    render_loop.run();
    let recorded = log.borrow().len();

    assert!(render_loop.frame().is_none());
    render_loop.teardown();
    assert_eq!(log.borrow().len(), recorded);
}

#[test]
fn dropping_running_loop_releases_in_reverse_order() {
    let (mut render_loop, log) = terrain_loop(None, &[RESOLUTION_UNIFORM, TIME_UNIFORM]);
    render_loop.frame();
    drop(render_loop);

    let calls = log.borrow();
    assert_eq!(
        calls[calls.len() - 3..],
        [
            Call::Release("mesh"),
            Call::Release("program"),
            Call::Release("surface")
        ]
    );
}
