//! Windowed mode: forwards winit pointer events to the interaction router
//! and spins the demo splat. Splat rendering itself is delegated to the
//! external renderer and is not wired up here.

use crate::config::ViewerConfig;
use anyhow::Result;
use glam::Quat;
use splatview_interact::{
    InteractionRouter, PointerEvent, PointerKind, SurfaceRect, XrSessionState,
};
use splatview_scene::{OrbitCamera, Scene};
use std::rc::Rc;
use std::time::Instant;
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

pub fn run(config: &ViewerConfig, mut scene: Scene, mut camera: OrbitCamera) -> Result<()> {
    let session = Rc::new(XrSessionState::new());
    let router = InteractionRouter::with_default_filter(
        SurfaceRect::from_size(config.width as f32, config.height as f32),
        Rc::clone(&session),
    );
    let subscription = router.attach()?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("splatview")
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .build(&event_loop)?;

    let spin_node = scene.first_splat_mesh();
    let spin_rate = config.spin_radians_per_second;
    let start = Instant::now();
    let mut last_frame = Instant::now();
    let mut cursor = (0.0f32, 0.0f32);

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    subscription.release();
                    elwt.exit();
                }
                WindowEvent::Resized(size) if size.width > 0 && size.height > 0 => {
                    router.set_surface(SurfaceRect::from_size(
                        size.width as f32,
                        size.height as f32,
                    ));
                    camera.set_aspect(size.width as f32 / size.height as f32);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    cursor = (position.x as f32, position.y as f32);
                    dispatch(&router, &scene, &camera, PointerKind::Move, cursor, &start);
                }
                WindowEvent::CursorEntered { .. } => {
                    dispatch(&router, &scene, &camera, PointerKind::Enter, cursor, &start);
                }
                WindowEvent::CursorLeft { .. } => {
                    dispatch(&router, &scene, &camera, PointerKind::Leave, cursor, &start);
                }
                WindowEvent::MouseInput {
                    state,
                    button: MouseButton::Left,
                    ..
                } => match state {
                    ElementState::Pressed => {
                        dispatch(&router, &scene, &camera, PointerKind::Down, cursor, &start);
                    }
                    ElementState::Released => {
                        dispatch(&router, &scene, &camera, PointerKind::Up, cursor, &start);
                        // Platform click convention: a click follows the release.
                        dispatch(&router, &scene, &camera, PointerKind::Click, cursor, &start);
                    }
                },
                WindowEvent::RedrawRequested => {
                    let dt = last_frame.elapsed().as_secs_f32();
                    last_frame = Instant::now();
                    if let Some(id) = spin_node {
                        if let Some(node) = scene.node_mut(id) {
                            node.transform.rotation =
                                Quat::from_rotation_y(spin_rate * dt) * node.transform.rotation;
                        }
                    }
                }
                _ => {}
            },
            Event::AboutToWait => window.request_redraw(),
            _ => {}
        }
    })?;

    Ok(())
}

fn dispatch(
    router: &InteractionRouter,
    scene: &Scene,
    camera: &OrbitCamera,
    kind: PointerKind,
    cursor: (f32, f32),
    start: &Instant,
) {
    let time_ms = start.elapsed().as_secs_f64() * 1000.0;
    let event = PointerEvent::new(kind, cursor.0, cursor.1, time_ms);
    if let Some(hit) = router.handle_pointer(scene, camera, &event) {
        if kind == PointerKind::Click {
            tracing::info!(node = %hit.node, point = ?hit.point, "picked splat");
        }
    }
}
