use macroquad::prelude::*;

fn window_conf() -> Conf {
    Conf {
        window_title: "Dragons are Hatching From Eggs And You Have To Escape!".to_owned(),
        window_width: 1280,
        window_height: 560,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    dragonhatch_web_lib::run().await;
}
