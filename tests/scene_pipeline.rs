//! End-to-end smoke test: the shipped manifest composes into a scene the
//! router can pick from.

use splatview_assets::{build_scene, SceneManifest};
use splatview_interact::{
    InteractionRouter, PointerEvent, PointerKind, SurfaceRect, XrSessionState,
};
use splatview_scene::OrbitCamera;
use std::path::Path;
use std::rc::Rc;

#[test]
fn shipped_manifest_composes_a_pickable_scene() {
    let manifest = SceneManifest::load_from_path(Path::new("config/scene.json"))
        .expect("shipped manifest should load");
    let scene = build_scene(&manifest).expect("shipped manifest should compose");

    // The demo scene: one splat at the origin, panorama behind it.
    let mesh_id = scene.first_splat_mesh().expect("splat present");
    assert_eq!(scene.node(mesh_id).unwrap().name, "butterfly");

    let camera = OrbitCamera::new(800.0 / 600.0, 5.0);
    let session = Rc::new(XrSessionState::new());
    let router = InteractionRouter::with_default_filter(
        SurfaceRect::from_size(800.0, 600.0),
        Rc::clone(&session),
    );
    let _sub = router.attach().unwrap();

    let hit = router
        .handle_pointer(
            &scene,
            &camera,
            &PointerEvent::new(PointerKind::Click, 400.0, 300.0, 0.0),
        )
        .expect("center click should hit the demo splat");
    assert_eq!(hit.node, mesh_id);
    // Unit-radius sphere at the origin, camera 5 out: near surface at 4.
    assert!((hit.distance - 4.0).abs() < 1e-3);

    // The panorama never intercepts picks even though it encloses the camera.
    let corner = router.handle_pointer(
        &scene,
        &camera,
        &PointerEvent::new(PointerKind::Click, 0.0, 0.0, 1.0),
    );
    assert!(corner.is_none());
}
