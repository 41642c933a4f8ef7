fn main() {
    println!("Hello from an embedded file!");
}
