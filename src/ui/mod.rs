mod panel_view;

pub use panel_view::render_panel;
