//! Phrase Pools
//!
//! Static, read-only reply fragments keyed by topic, signal, horizon and
//! instrument. Selection happens in the composer via [`opinion_core::Seed`].

use opinion_core::Horizon;

use crate::model::{Instrument, Signal, Topic};

pub type Pool = &'static [&'static str];

/// Asked once per session when the horizon is unknown
pub const HORIZON_QUESTION: &str = "Kısa vade mi düşünüyorsun (1-7 gün) yoksa uzun vade mi?";

pub const HORIZON_LEAD: &str =
    "Sana daha net bir yorum verebilmem için önce bir şeyi bilmem gerekiyor.";

pub const WHY_HEADING: &str = "Bunu böyle düşünmemin 3 nedeni:";

pub const PRO_NOTICE: &str = "Profesyonel mod bugün için aktif edildi. \
Bir sonraki mesajında skorları ve haber başlıklarını da içeren detaylı yorum alacaksın.";

pub const PRO_LIMIT_REACHED: &str = "Profesyonel mod için bugünkü hakkını kullandın. \
Yarın tekrar detaylı yorum alabilirsin; bu arada normal modda sormaya devam edebilirsin.";

pub const PRO_SCORES_HEADING: &str = "Profesyonel özet:";
pub const PRO_NEWS_HEADING: &str = "Öne çıkan başlıklar:";

pub const EMPTY_MESSAGE_REPLY: &str = "Mesaj boş görünüyor. Ne için soruyorsun?";
pub const BUSY_REPLY: &str = "Şu an kısa bir yoğunluk var. 10 saniye sonra tekrar dener misin?";
pub const QUOTA_REPLY: &str =
    "Bugünlük soru hakkın doldu. Yarın tekrar yazarsan seve seve yardımcı olurum.";

const GOLD_OPENERS: Pool = &[
    "Altın tarafında şu an en kritik nokta panik yerine planla ilerlemek.",
    "Altında hareket var ama karar için acele etmek doğru olmaz.",
    "Altın cephesinde kısa vadede dalgalanma normal; önemli olan seviyeyi yönetmek.",
];

const ONS_OPENERS: Pool = &[
    "Ons altın global tarafta veri akışına çok hassas.",
    "Ons tarafında hareketi belirleyen ana unsur dolar ve faiz beklentileri.",
    "Ons altın kararında haber akışı kadar yön teyidi de önemli.",
];

const USD_OPENERS: Pool = &[
    "Dolar/TL tarafında hareketler çoğu zaman hızlı olur; risk yönetimi şart.",
    "Kur tarafında tek hamle yerine parçalı plan daha sağlıklı.",
    "USD/TRY için en önemli konu, dalgalanmaya karşı disiplinli kalmak.",
];

const EUR_OPENERS: Pool = &[
    "Euro/TL tarafında hem EURUSD hem TL bacağı etkili; çift yönlü düşünmek gerekir.",
    "Euro kararında yön kadar zamanlama da önemlidir.",
    "EUR/TRY’de volatilite dönemlerinde temkinli olmak avantaj sağlar.",
];

const SILVER_OPENERS: Pool = &[
    "Gümüşte hareketler altına göre daha sert olabilir; marjı iyi hesapla.",
    "Gümüş tarafı fırsat da verir risk de; planlı gitmek şart.",
    "Gümüşte küçük dalga büyük etki yapabilir; acele karar istemez.",
];

const GENERIC_OPENERS: Pool = &[
    "Bu tip sorularda tek cümlelik cevap yerine kısa bir plan kurmak daha doğru.",
    "Net karar için birkaç kriteri birlikte değerlendirmek gerekir.",
    "Hızlı karar yerine kontrollü adım daha sağlıklı.",
];

pub fn openers(topic: Topic) -> Pool {
    match topic {
        Topic::Gold => GOLD_OPENERS,
        Topic::Ons => ONS_OPENERS,
        Topic::Usd => USD_OPENERS,
        Topic::Eur => EUR_OPENERS,
        Topic::Silver => SILVER_OPENERS,
        Topic::Generic => GENERIC_OPENERS,
    }
}

pub fn decision_lines(signal: Signal) -> Pool {
    match signal {
        Signal::Al => &[
            "Benim yaklaşımım: **AL yönü** daha mantıklı görünüyor.",
            "Şu an için **AL tarafı** daha avantajlı duruyor.",
            "Mevcut koşulda **AL** tarafı önde.",
        ],
        Signal::Sat => &[
            "Benim yaklaşımım: **SAT yönü** daha güvenli duruyor.",
            "Şu an için **SAT** tarafı daha mantıklı.",
            "Mevcut koşulda **SAT** tarafı önde.",
        ],
        Signal::Bekle => &[
            "Benim yaklaşımım: **BEKLE** daha doğru.",
            "Şu an için **BEKLE** daha sağlıklı görünüyor.",
            "Mevcut koşulda **BEKLE-GÖR** daha mantıklı.",
        ],
    }
}

pub fn why_bullets(signal: Signal) -> Pool {
    match signal {
        Signal::Al => &[
            "Yukarı yönlü hareket ihtimali, aşağı riskten bir tık daha ağır basıyor.",
            "Trend/ivme desteği varsa alım tarafı güçlenir.",
            "Planlı alım (parçalı giriş) riski azaltır.",
        ],
        Signal::Sat => &[
            "Aşağı yönlü baskı sinyali varsa korunma önceliklidir.",
            "Hızlı geri çekilmelerde zarar büyümeden kontrol etmek gerekir.",
            "Parçalı çıkış, tek seferlik satıştan daha sağlıklıdır.",
        ],
        Signal::Bekle => &[
            "Net yön teyidi zayıfsa işlem sayısı değil, kalite önemlidir.",
            "Kararsız bölgede al-sat yapmak gereksiz risk üretir.",
            "Bir onay daha gelmeden harekete geçmemek daha güvenli.",
        ],
    }
}

pub fn plan_lines(signal: Signal) -> Pool {
    match signal {
        Signal::Al => &[
            "Ben olsam tek sefer yerine **2-3 parça** alım planlarım; geri çekilmede ortalama düşürmek kolaylaşır.",
            "Ben olsam **parçalı alım** yaparım; fiyat hızlanırsa son parçayı bırakırım.",
            "Ben olsam **kademeli giriş** yaparım; beklenmedik dalgada panik olmaz.",
        ],
        Signal::Sat => &[
            "Ben olsam **kademeli satış** yaparım; bir kısmını korumaya alıp kalanını izlerim.",
            "Ben olsam önce **riskli kısmı azaltırım**, sonra piyasa teyidine göre devam ederim.",
            "Ben olsam **zararı büyütmeden** pozisyonu hafifletirim; sonra tekrar değerlendiririm.",
        ],
        Signal::Bekle => &[
            "Ben olsam **yön teyidi** gelene kadar izlerim; acele işlem genelde pahalıya patlar.",
            "Ben olsam bir süre **beklerim**; netleşme gelince daha rahat karar verilir.",
            "Ben olsam **bekle-gör** yaparım; net sinyal gelmeden işlem açmam.",
        ],
    }
}

pub fn horizon_notes(horizon: Horizon) -> Pool {
    match horizon {
        Horizon::Short => &[
            "Kısa vadede (1-7 gün) gürültü yüksek olur; stop seviyeni baştan belirle.",
            "Kısa vadeli bakışta günlük haber akışı fiyatı sert oynatabilir; pozisyonu küçük tut.",
            "Kısa vade için hedef ve çıkış noktanı işlemden önce netleştir.",
        ],
        Horizon::Long => &[
            "Uzun vadede günlük dalgalanmalar ikinci planda kalır; düzenli alım disiplini öne çıkar.",
            "Uzun vadeli bakışta maliyet ortalaması, tek seferlik zamanlamadan daha önemlidir.",
            "Uzun vade için portföyün tamamını tek üründe toplamamak sağlıklı olur.",
        ],
    }
}

/// Follow-up questions while the horizon is still unknown
pub const HORIZON_QUESTIONS: Pool = &[
    HORIZON_QUESTION,
    "Bu pozisyonu kaç gün ya da hafta taşımayı düşünüyorsun?",
    "Kısa vadeli bir işlem mi, yoksa birikim amaçlı mı bakıyorsun?",
];

/// Follow-up questions once the horizon is known
pub const POSITION_QUESTIONS: Pool = &[
    "Elinde var mı yoksa yeni mi gireceksin?",
    "Kaç gün/hafta taşıma niyetin var?",
    "Bütçenin ne kadarını bu ürüne ayırmayı düşünüyorsun?",
];

pub const DISCLAIMERS: Pool = &[
    "Not: Bu yorum yatırım tavsiyesi değildir, genel değerlendirmedir.",
    "Not: Bu değerlendirme yatırım tavsiyesi değildir; risk yönetimi sana aittir.",
    "Not: Yatırım tavsiyesi değildir; karar verirken kendi planını baz al.",
];

pub fn instrument_intros(instrument: Instrument) -> Pool {
    match instrument {
        Instrument::EurUsd => &[
            "EUR/USD paritesi Fed ve ECB arasındaki faiz farkına çok duyarlı.",
            "Parite tarafında ABD verileri günün yönünü belirleyebiliyor.",
        ],
        Instrument::UsdTry => &[
            "Dolar/TL için iç piyasa koşulları kadar küresel dolar endeksi de önemli.",
            "Dolar/TL tarafında TCMB adımları kısa vadede belirleyici olabiliyor.",
        ],
        Instrument::EurTry => &[
            "Euro/TL iki bacaklı bir kur; hem parite hem TL tarafını izlemek gerekir.",
            "Euro/TL hareketinde EUR/USD paritesinin payı büyük.",
        ],
        Instrument::Ons => &[
            "Ons altın dolar bazlı fiyatlanır; ABD faiz beklentileri doğrudan etkiler.",
            "Ons tarafında küresel risk iştahı fiyatı hızla değiştirebilir.",
        ],
        Instrument::Silver => &[
            "Gümüş hem değerli metal hem sanayi metali; iki tarafın talebi de fiyata yansır.",
            "Gümüşün oynaklığı altından yüksektir; bunu pozisyon büyüklüğüne yansıt.",
        ],
        Instrument::Bracelet22 => &[
            "22 ayar bilezikte işçilik maliyeti alış-satış farkını büyütür.",
            "Bilezik alırken gramın yanında işçilik farkını da hesaba kat.",
        ],
        Instrument::Quarter => &[
            "Çeyrek altında alış-satış makası gram altına göre daha geniş olabilir.",
            "Çeyrek altın küçük bütçeyle birikim için pratik bir seçenek.",
        ],
        Instrument::Half => &[
            "Yarım altında da işçilik payı fiyata eklenir; makası kontrol et.",
            "Yarım altın, çeyreğe göre daha az adetle aynı birikimi sağlar.",
        ],
        Instrument::Ata => &[
            "Ata altında fiyat gram altının yanında darphane primine de bağlı.",
            "Ata altın birikim için tercih edilir ama makası genelde daha geniştir.",
        ],
        Instrument::Full => &[
            "Tam altında birim fiyat yüksek olduğu için parçalı alım zorlaşır.",
            "Tam altın uzun vadeli birikimde sık tercih edilir.",
        ],
        Instrument::Gram => &[
            "Gram altın, ons ve dolar/TL hareketinin birleşimiyle fiyatlanır.",
            "Gram altında hem ons hem kur tarafını birlikte izlemek gerekir.",
        ],
        Instrument::Gold | Instrument::Generic => &[],
    }
}
