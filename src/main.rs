fn main() {
    std::process::exit(moviebatch::app::startup::startup());
}
