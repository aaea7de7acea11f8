#![allow(dead_code)]

use kurs_sniper::model::Article;

pub const RUPIAH_BODY: &str = "Nilai tukar rupiah dibuka melemah pada perdagangan Selasa pagi. \
Pada pembukaan, rupiah diperdagangkan di level 16.850/US$. \
Kemudian pada pukul 10:15 WIB, rupiah bergerak ke angka 16.880/US$, melemah 0,24% dari sebelumnya. \
Mata uang Asia lain bergerak bervariasi. Peso Filipina menguat 0,12%, yen Jepang melemah 0,35%, \
sementara ringgit Malaysia stagnan di 0%. Won Korea terdepresiasi -0,41%.";

pub const GOLD_BODY: &str = "Jakarta, 20 Februari 2026 - Harga emas PT Aneka Tambang Tbk atau Antam \
hari ini dibanderol Rp 2.944.000/gram, naik Rp 28.000/gram dibanding hari sebelumnya. \
Sementara itu, harga buyback emas Antam berada di Rp 2.725.000/gram, turun Rp 31.000/gram. \
Harga emas dunia di pasar spot tercatat US$ 4.997,7/troy ons, bertambah 0,43% dari hari sebelumnya.";

pub fn rupiah_article() -> Article {
    Article::new("Rupiah Dibuka Melemah ke 16.850/US$", RUPIAH_BODY)
}

pub fn gold_article() -> Article {
    Article::new("Harga Emas Antam Naik Rp28.000", GOLD_BODY)
}
