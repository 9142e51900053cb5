use terminal_toys::{app, ToyKind};

fn main() -> anyhow::Result<()> {
    app::standalone(ToyKind::Fire)
}
