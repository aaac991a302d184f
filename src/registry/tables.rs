use super::FieldKind::*;
use super::{FieldConfig as F, OptionSource, TableConfig};
use crate::resources::{announcements, complaints, users};

const CORPORATE_CATEGORIES: &[&str] = &["baskan", "misyon", "vizyon", "ilkelerimiz"];

pub static CORPORATE: TableConfig = TableConfig {
    table_name: "KURUMSAL_BASKAN_MISYON_VIZYON_ILKELERIMIZ",
    display_name: "Başkan, Misyon, Vizyon & İlkelerimiz",
    api_endpoint: "/api/kurumsal/baskan-misyon-vizyon",
    id_field: "ID",
    fields: &[
        F::new("ID", "ID", Number),
        F::new("resimUrl1", "Resim URL 1", Image),
        F::new("imageUrl2", "Resim URL 2", Image),
        F::new("BASLIK", "Başlık", Text).required(),
        F::new("ICERIK", "İçerik", Editor).required(),
        F::new("DELTA", "Delta", Text),
        F::new("KATEGORI", "Kategori", Select)
            .required()
            .options(OptionSource::Fixed(CORPORATE_CATEGORIES)),
    ],
};

pub static MANAGEMENT_CHART: TableConfig = TableConfig {
    table_name: "KURUMSAL_YONETIM_SEMASI",
    display_name: "Yönetim Şeması",
    api_endpoint: "/api/kurumsal/yonetim-semasi",
    id_field: "ID",
    fields: &[
        F::new("ID", "ID", Number),
        F::new("isimSoyisim", "İsim Soyisim", Text),
        F::new("resimUrl", "Resim", Image),
        F::new("pozisyon", "Pozisyon", Text),
        F::new("siraNo", "Sıra No", Text),
        F::new("mudurlukler", "Müdürlükler", Textarea),
        F::new("delta", "Delta", Text).required(),
        F::new("email", "E-posta", Text).required(),
        F::new("telefon", "Telefon", Text).required(),
        F::new("biyografi", "Biyografi", Textarea).required(),
    ],
};

pub static ETHICS_MEDIATION: TableConfig = TableConfig {
    table_name: "KURUMSAL_ETIK_ARABULUCULUK",
    display_name: "Etik, Arabuluculuk",
    api_endpoint: "/api/kurumsal/etik-arabuluculuk",
    id_field: "ID",
    fields: &[
        F::new("ID", "ID", Number),
        F::new("Ad", "Ad", Text),
        F::new("unvan", "Unvan", Text),
        F::new("gorev", "Görev", Text),
        F::new("tip", "Tip", Text).required(),
        F::new("ilke", "İlke", Textarea).required(),
        F::new("delta", "Delta", Text).required(),
        F::new("resimUrl", "Resim URL", Image),
    ],
};

pub static EVENT: TableConfig = TableConfig {
    table_name: "ETKINLIKLER",
    display_name: "Etkinlik",
    api_endpoint: "/api/etkinlikler",
    id_field: "id",
    fields: &[
        F::new("id", "ID", Number),
        F::new("baslik", "Başlık", Text).required().max_length(255),
        F::new("tarih", "Tarih", Date).required(),
        F::new("resimUrl", "Resim URL", Image),
        F::new("aciklama", "Açıklama", Textarea),
    ],
};

pub static NEWS: TableConfig = TableConfig {
    table_name: "HABERLER",
    display_name: "Haber",
    api_endpoint: "/api/haberler",
    id_field: "id",
    fields: &[
        F::new("id", "ID", Number),
        F::new("baslik", "Başlık", Text).required().max_length(255),
        F::new("tarih", "Tarih", Date).required(),
        F::new("kategoriId", "Kategori", Select)
            .required()
            .options(OptionSource::NewsCategories),
        F::new("aciklama", "Açıklama", Editor).required(),
        F::new("resim1", "Resim 1", Image),
        F::new("resim2", "Resim 2", Image),
    ],
};

pub static CITY_SERVICE: TableConfig = TableConfig {
    table_name: "HIZMETLER",
    display_name: "Hizmet",
    api_endpoint: "/api/hizmetler",
    id_field: "id",
    fields: &[
        F::new("id", "ID", Number),
        F::new("baslik", "Başlık", Text).required().max_length(255),
        F::new("kategori", "Kategori", Text),
        F::new("imgUrl", "Görsel", Image),
        F::new("telefon", "Telefon", Text).placeholder("0262 000 00 00"),
        F::new("mail", "E-posta", Text),
        F::new("konum", "Konum", Text),
        F::new("buttonDetay", "Detay Butonu", Text),
        F::new("buttonKonum", "Konum Butonu", Text),
    ],
};

pub static REPORT: TableConfig = TableConfig {
    table_name: "RAPORLAR",
    display_name: "Rapor",
    api_endpoint: "/api/raporlar",
    id_field: "raporId",
    fields: &[
        F::new("raporId", "ID", Number),
        F::new("raporBaslik", "Başlık", Text).required().max_length(255),
        F::new("raporUrl", "Dosya URL", Text).required(),
        F::new("raporTarihi", "Rapor Tarihi", Date),
        F::new("raporDurum", "Yayında", Boolean),
        F::new("categoryId", "Kategori", Select).options(OptionSource::ReportCategories),
    ],
};

pub static PUBLICATION: TableConfig = TableConfig {
    table_name: "YAYINLAR",
    display_name: "Yayın",
    api_endpoint: "/api/yayinlar",
    id_field: "yayinId",
    fields: &[
        F::new("yayinId", "ID", Number),
        F::new("yayinBaslik", "Başlık", Text).required().max_length(255),
        F::new("yayinUrl", "Yayın URL", Text).required(),
        F::new("description", "Açıklama", Textarea),
        F::new("categoryId", "Kategori", Select)
            .required()
            .options(OptionSource::PublicationCategories),
    ],
};

pub static ANNOUNCEMENT: TableConfig = TableConfig {
    table_name: "DUYURU",
    display_name: "Duyuru",
    api_endpoint: "/api/duyuru",
    id_field: "id",
    fields: &[
        F::new("id", "ID", Number),
        F::new("baslik", "Başlık", Text).required().max_length(255),
        F::new("icerik", "İçerik", Editor).required(),
        F::new("durum", "Durum", Select)
            .required()
            .options(OptionSource::Fixed(announcements::STATUS_OPTIONS)),
        F::new("olusturanKullanici", "Oluşturan", Text).required(),
    ],
};

pub static COMPLAINT: TableConfig = TableConfig {
    table_name: "SIKAYET_ILETISIM",
    display_name: "Şikayet / İletişim",
    api_endpoint: "/api/sikayet-iletisim",
    id_field: "id",
    fields: &[
        F::new("id", "ID", Number),
        F::new("adSoyad", "Ad Soyad", Text).required(),
        F::new("eMail", "E-posta", Text),
        F::new("telefon", "Telefon", Text),
        F::new("konu", "Konu", Text).required(),
        F::new("mesaj", "Mesaj", Textarea).required(),
        F::new("kategori", "Kategori", Select)
            .options(OptionSource::Fixed(complaints::CATEGORY_OPTIONS)),
        F::new("oncelik", "Öncelik", Select)
            .options(OptionSource::Fixed(complaints::PRIORITY_OPTIONS)),
        F::new("durum", "Durum", Select)
            .options(OptionSource::Fixed(complaints::STATUS_OPTIONS)),
        F::new("adres", "Adres", Textarea),
        F::new("mahalle", "Mahalle", Text),
        F::new("ilce", "İlçe", Text),
    ],
};

pub static USER: TableConfig = TableConfig {
    table_name: "KULLANICILAR",
    display_name: "Kullanıcı",
    api_endpoint: "/api/users",
    id_field: "id",
    fields: &[
        F::new("id", "ID", Number),
        F::new("tcno", "TC Kimlik No", Text).required().max_length(11),
        F::new("isim", "İsim", Text).required().max_length(100),
        F::new("password", "Parola", Password),
        F::new("status", "Durum", Select)
            .required()
            .options(OptionSource::Fixed(users::STATUS_OPTIONS)),
        F::new("yetkilerJson", "Yetkiler (JSON)", Textarea).placeholder("{}"),
    ],
};

pub static DIRECTORATE: TableConfig = TableConfig {
    table_name: "MUDURLUKLER",
    display_name: "Müdürlük",
    api_endpoint: "/rest/api/mudurlukler",
    id_field: "id",
    fields: &[
        F::new("id", "ID", Number),
        F::new("name", "Müdürlük İsmi", Text).required().max_length(255),
        F::new("managerName", "Ad Soyad", Text).required().max_length(255),
        F::new("email", "E-posta", Text),
        F::new("imageUrl", "Görsel", Image),
        F::new("mudAciklamasi", "Müdürlük Açıklaması", Editor),
        F::new("regulations", "Yönetmelikler", Editor),
        F::new("biography", "Biyografi", Textarea),
    ],
};

pub static MUHTAR: TableConfig = TableConfig {
    table_name: "MUHTARLAR",
    display_name: "Muhtar",
    api_endpoint: "/api/muhtarlar",
    id_field: "id",
    fields: &[
        F::new("id", "ID", Number),
        F::new("ad", "Ad", Text).required(),
        F::new("soyad", "Soyad", Text).required(),
        F::new("mahalle", "Mahalle", Text).required(),
        F::new("telefon", "Telefon", Text).placeholder("0262 000 00 00"),
        F::new("eposta", "E-posta", Text),
        F::new("konum", "Konum", Text).placeholder("Adres veya 41.0,29.0"),
        F::new("resimUrl", "Görsel", Image),
    ],
};
