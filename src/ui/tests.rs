use super::*;
use crate::player::slider_config;

fn area() -> Rect {
    Rect::new(10, 5, 40, 1)
}

#[test]
fn pointer_event_maps_buttons_and_offsets() {
    let ev = pointer_event(area(), 20, 5, MouseButton::Left).unwrap();
    assert_eq!(ev.button, 0);
    assert_eq!(ev.offset_x, 10.0);
    assert_eq!(ev.element_width, 40.0);

    assert_eq!(pointer_event(area(), 20, 5, MouseButton::Middle).unwrap().button, 1);
    assert_eq!(pointer_event(area(), 20, 5, MouseButton::Right).unwrap().button, 2);
}

#[test]
fn pointer_event_outside_bar_is_ignored() {
    assert!(pointer_event(area(), 9, 5, MouseButton::Left).is_none());
    assert!(pointer_event(area(), 50, 5, MouseButton::Left).is_none());
    assert!(pointer_event(area(), 20, 6, MouseButton::Left).is_none());
}

#[test]
fn slider_rows_map_top_to_zero_and_bottom_to_max() {
    let slider = VolumeSlider::new(slider_config(1.0));
    let column = Rect::new(0, 2, 3, 11);

    assert_eq!(slider.value_at_row(column, 2), Some(0.0));
    assert_eq!(slider.value_at_row(column, 7), Some(50.0));
    assert_eq!(slider.value_at_row(column, 12), Some(100.0));
    assert_eq!(slider.value_at_row(column, 13), None);
}

#[test]
fn slider_set_and_nudge_clamp_to_range() {
    let mut slider = VolumeSlider::new(slider_config(0.5));
    assert_eq!(slider.value(), 50.0);
    assert_eq!(slider.nudge(-80.0), 0.0);
    assert_eq!(slider.set(120.0), 100.0);
}

#[test]
fn volume_lines_fill_below_handle() {
    let slider = VolumeSlider::new(slider_config(1.0));
    assert!(volume_lines(&slider, 4).iter().all(|l| l.to_string().contains('█')));

    let slider = VolumeSlider::new(slider_config(0.0));
    let lines = volume_lines(&slider, 4);
    assert_eq!(lines.iter().filter(|l| l.to_string().contains('█')).count(), 1);
}

#[test]
fn cover_label_uses_file_name() {
    assert_eq!(cover_label("/music/album/cover.jpg"), "cover.jpg");
    assert_eq!(cover_label("default.png"), "default.png");
}

#[test]
fn gauge_ratio_is_always_in_range() {
    assert_eq!(gauge_ratio(50.0), 0.5);
    assert_eq!(gauge_ratio(140.0), 1.0);
    assert_eq!(gauge_ratio(f64::NAN), 0.0);
}

#[test]
fn tracks_title_names_the_scanned_folder() {
    let mut app = App::new(Vec::new());
    assert_eq!(tracks_title(&app), " tracks ");

    app.set_current_dir("/music/jazz".to_string());
    assert_eq!(tracks_title(&app), " tracks • /music/jazz ");
}
