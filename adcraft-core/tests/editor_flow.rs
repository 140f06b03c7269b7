//! End-to-end editor flows: control events through to the scene graph.

use adcraft_core::{
    BindingOutcome, CanvasSize, ControlEvent, ControlSet, Editor, ElementKind, FileSelection,
    ImageAsset, ImageSlot, Orientation, Role, Scene, Session, TemplateId, TextField,
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn split_left_title_example() {
    let mut editor = Editor::new(ControlSet::all());
    editor.handle(ControlEvent::TemplateSelected("splitLeft".to_string()));
    editor.handle(ControlEvent::TextChanged {
        field: TextField::Title,
        value: "Hi".to_string(),
    });

    let scene = editor.scene();
    assert_eq!(editor.session().canvas_size(), CanvasSize::new(400, 500));

    let image = scene.find_by_role(Role::MainImage).expect("image placeholder");
    let bounds = image.frame.bounds();
    assert!(approx(bounds.x, 0.0) && approx(bounds.y, 0.0));
    assert!(approx(bounds.width, 200.0) && approx(bounds.height, 500.0));

    let title = scene.find_by_role(Role::Title).expect("title");
    assert_eq!(title.text_content(), Some("Hi"));
    assert!(approx(title.frame.x, 300.0) && approx(title.frame.y, 200.0));
}

#[test]
fn every_template_and_orientation_renders_required_roles() {
    for template in TemplateId::ALL {
        for orientation in Orientation::ALL {
            let session = Session::new()
                .with_template(template)
                .with_orientation(orientation);
            let mut scene = Scene::default();
            adcraft_core::render(&mut scene, &session);

            assert_eq!(scene.count_role(Role::MainImage), 1, "{template} {orientation}");
            assert_eq!(scene.count_role(Role::Title), 1, "{template} {orientation}");
            assert_eq!(scene.count_role(Role::Subtitle), 1, "{template} {orientation}");
        }
    }
}

#[test]
fn rerendering_does_not_accumulate() {
    let mut editor = Editor::default();
    editor.complete_upload(
        ImageSlot::Logo,
        ImageAsset::new("image/png", 64, 64, "data:image/png;base64,AA==").expect("asset"),
    );
    let count = editor.scene().element_count();

    editor.rerender();
    editor.rerender();
    assert_eq!(editor.scene().element_count(), count);

    editor.handle(ControlEvent::TemplateSelected("grid".to_string()));
    editor.handle(ControlEvent::TemplateSelected("classic".to_string()));
    assert_eq!(editor.scene().element_count(), count);
}

#[test]
fn upload_then_switch_templates_keeps_image_clipped() {
    let mut editor = Editor::default();
    let outcome = editor.handle(ControlEvent::FileSelected {
        slot: ImageSlot::MainImage,
        file: FileSelection {
            name: "hero.jpg".to_string(),
            mime: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        },
    });
    let BindingOutcome::UploadPending(pending) = outcome else {
        panic!("expected pending upload");
    };
    editor.complete_upload(
        pending.slot,
        ImageAsset::new("image/jpeg", 1200, 800, "data:image/jpeg;base64,AA==").expect("asset"),
    );

    for id in ["splitLeft", "splitRight", "splitTop", "grid"] {
        editor.handle(ControlEvent::TemplateSelected(id.to_string()));
        let image = editor.scene().find_by_role(Role::MainImage).expect("image");
        let ElementKind::Image { clip, .. } = &image.kind else {
            panic!("{id}: main image should be an image element");
        };
        let clip = clip.as_ref().expect("non-classic templates clip");
        let bounds = image.frame.bounds();
        assert!(bounds.width >= clip.width - 1e-3, "{id}: image narrower than clip");
        assert!(bounds.height >= clip.height - 1e-3, "{id}: image shorter than clip");
        let (cx, cy) = clip.center();
        assert!(approx(image.frame.x, cx) && approx(image.frame.y, cy));
    }
}

#[test]
fn orientation_change_reflows_positions() {
    let mut editor = Editor::default();
    editor.handle(ControlEvent::OrientationSelected("horizontal".to_string()));
    let title = editor.scene().find_by_role(Role::Title).expect("title");
    assert!(approx(title.frame.x, 300.0));
    assert!(approx(title.frame.y, 314.0 * 0.7));

    editor.handle(ControlEvent::OrientationSelected("unknown".to_string()));
    assert_eq!(editor.session().orientation(), Orientation::Vertical);
}
