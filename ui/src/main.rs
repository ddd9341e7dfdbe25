fn main() {
    plan_ui::init_logging();
    yew::Renderer::<plan_ui::App>::new().render();
}
