use anyhow::{Context, Result};
use fluent_geom::tessellate::{self, DEFAULT_TOLERANCE};
use fluent_geom::{BorderSides, BorderStyle, Color, Point, Rect, Shape, Size};
use fluent_view::{
    Decoration, InputNode, KeyboardEvent, KeyboardScroll, LayerName, Mask, ReturnAction,
};

#[test]
fn decorated_star_card() -> Result<()> {
    let mut card = Decoration::new(Rect::new(40.0, 40.0, 120.0, 120.0));
    card.mask(Mask::Shape(Shape::Star { points: 6 }), &Mask::None)
        .border(BorderStyle::Solid, Some(Color::grey80()), 2.0, BorderSides::ALL)
        .mask_shadow(Some(Color::grey80()), 4.0, 0.4, Point::new(0.0, 3.0));

    let mask = card.mask_path().context("star mask")?;
    assert_eq!(mask.vertices().len(), 12);
    let mesh = tessellate::fill(mask, DEFAULT_TOLERANCE)?;
    assert!(mesh.area() > 0.0 && mesh.area() < 120.0 * 120.0);

    let layers: Vec<LayerName> = card.layers().iter().map(|l| l.name).collect();
    assert_eq!(layers, vec![LayerName::BorderAllSides]);
    let shadow = card.shadow_layer().context("shadow layer")?;
    assert_eq!(shadow.frame, Rect::new(40.0, 40.0, 120.0, 120.0));

    assert!(card.hit_test(Point::new(60.0, 60.0)));
    assert!(!card.hit_test(Point::new(1.0, 1.0)));
    Ok(())
}

#[test]
fn resize_regenerates_mask_and_border() -> Result<()> {
    let mut view = Decoration::new(Rect::new(0.0, 0.0, 100.0, 50.0));
    view.mask(Mask::Shape(Shape::Triangle), &Mask::None)
        .border(BorderStyle::Solid, Some(Color::grey40()), 1.0, BorderSides::ALL);
    view.set_bounds(Size::new(200.0, 80.0));

    let bounds = view.mask_path().and_then(|p| p.bounds()).context("mask bounds")?;
    assert_eq!(bounds, Rect::new(0.0, 0.0, 200.0, 80.0));
    assert_eq!(view.layers().len(), 1);
    assert_eq!(Some(&view.layers()[0].path), view.mask_path());
    Ok(())
}

#[test]
fn sign_up_form_keyboard_flow() -> Result<()> {
    let mut scroll = KeyboardScroll::new(Rect::new(0.0, 0.0, 375.0, 667.0)).with_inputs(vec![
        InputNode::text_field(1, Rect::new(16.0, 120.0, 343.0, 44.0)),
        InputNode::text_field(2, Rect::new(16.0, 400.0, 343.0, 44.0)),
        InputNode::text_field(3, Rect::new(16.0, 560.0, 343.0, 44.0)),
    ]);
    scroll.prepare_inputs();
    scroll.focus(1);

    let keyboard = KeyboardEvent {
        frame: Rect::new(0.0, 376.0, 375.0, 291.0),
        duration: 0.3,
        curve: 0,
    };
    let shown = scroll.keyboard_will_show(&keyboard).context("keyboard shown")?;
    assert_eq!(shown.content_inset.bottom, 291.0);
    assert_eq!(shown.duration, 0.3);
    assert_eq!(shown.curve, 7);
    scroll.animation_finished();

    let ReturnAction::FocusMoved { id, adjustment } = scroll.text_field_should_return() else {
        anyhow::bail!("expected focus to move");
    };
    assert_eq!(id, 2);
    let adjustment = adjustment.context("scrolled to next field")?;
    // 376 visible, padding (376 - 44) / 2 = 166 above the field
    assert_eq!(adjustment.content_offset.y, 234.0);

    let hidden = scroll
        .keyboard_will_hide(&KeyboardEvent::new(Rect::new(0.0, 667.0, 375.0, 291.0)))
        .context("keyboard hidden")?;
    assert_eq!(hidden.content_inset.bottom, 0.0);
    assert!(!scroll.keyboard_visible());
    Ok(())
}
