pub mod category_bar;
pub mod control;
pub mod detail_panel;
pub mod header;
pub mod mode_tabs;
pub mod param_list;
pub mod quiz_view;
pub mod sandbox_view;
