fn main() {
    labsetup::app::cli::run();
}
