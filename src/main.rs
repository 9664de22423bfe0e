fn main() {
    smash_dragons::game::run();
}
