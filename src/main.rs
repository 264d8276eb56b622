fn main() {
    map_editor::run();
}
