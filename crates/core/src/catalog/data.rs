//! The static price list and image sources the catalog is derived from.
//!
//! `RAW_DATA` is the production price list exactly as supplied by the
//! workshop in Cotonou: one `name,price FCFA` row per product. Everything
//! else about a product (category, unit, EUR price, image) is derived from
//! the name and this base price at process start.

/// Raw price list, CSV with a header row. Prices in FCFA.
pub const RAW_DATA: &str = "\
MATIERES PREMIERES,PRIX LITRE/KILOS
Huile de neem pressée à froid,6750 FCFA
Huile d’avocat extra vierge,12000 FCFA
Beurre de Karité brut,3600 FCFA
Huile de ricin pressée à froid,15750 FCFA
Huile de palmiste brute,1800 FCFA
Huile de coco pressée à froid,5700 FCFA
Huile de tournesol extra vierge,6000 FCFA
Huile de baobab pressée à froid,9750 FCFA
Huile de soja extra vierge,3300 FCFA
Poudre de baobab tamisée en vrac,5250 FCFA
Huile de nigelle pressée à froid,18000 FCFA
Huile d’hibiscus pure,18750 FCFA
Huile de carotte pure,13200 FCFA
Huile de fenugrec pressée à froid,17700 FCFA
Huile d’Akpi pressée à froid,20250 FCFA
Poudre de moringa naturelle,10500 FCFA
Poudre de neem naturelle,6750 FCFA
Huile de moringa pressée à froid,49500 FCFA
Huile de sésame pressée à froid,11250 FCFA
Aklui de Sorgho - 600g,2751 FCFA
Farine de maÏs - 1kg,1493 FCFA
Farine de telibor (Cosette d'igname) - 1kg,3537 FCFA
Aklui de Maïs - 600g,2456 FCFA
Aklui de Mil - 600g,3000 FCFA
Farine de Agbeli - 600g,2941 FCFA
Farine de riz (ABLO) - 500g,2941 FCFA
Farine de Féchouada - 300g,4493 FCFA
Farine de Côme - 800g,2941 FCFA
Farine de Mawê Maïs - 600g,2941 FCFA
Farine de AKASSA - 600g,2941 FCFA
Farine de ATA GBAZA - 300g,2941 FCFA
Farine de Adowê - 300g,2941 FCFA
Farine de Mawê Sorgho - 600g,4493 FCFA
Tagliatelle au manioc,1801 FCFA
Piment rouge de table - 500g,2063 FCFA
Kluiklui – Galette d'arachide croustillante - 300g,1035 FCFA
Huile rouge - 500ml,1231 FCFA
Pomme de terre - 1kg,1769 FCFA
Igname frais - 1kg,3373 FCFA
Carte-cadeau,9825 FCFA
Noix d'acajou - 1kg,7074 FCFA
Ognon - 1kg,2037 FCFA
Ail - 1 sachet,740 FCFA
Graine de chia,1801 FCFA
Piment vert de table - 500g,1349 FCFA
Infusion verveine menthe - 25 sachets,2692 FCFA
Lanhouiwin - 100g,2063 FCFA
Purée de tomate Yon-na - 1Kg,2456 FCFA
Infusion digestion légère - 20 sachets,2692 FCFA
Sel de mer fin iodé - La baleine - 125g,1801 FCFA
Persil séché,1474 FCFA
Persillade Assaisonnement,1474 FCFA
Piment noir de Kom - 600g,9039 FCFA
Piment noir de Kom - 300g,4127 FCFA
Poudre de cannelle,1801 FCFA
Poivre blanc bio moulu,1801 FCFA
Poivre noir bio moulu,1801 FCFA
Graine d'anis vert,1801 FCFA
Gingembre en poudre bio,3000 FCFA
Monodara myristica - Épices,3000 FCFA
Purée de tomate Yon-na - 500g,2253 FCFA
Thym séché,1179 FCFA
Poudre de piment vert CUISTOS - 100g,3747 FCFA
Poudre de piment CUISTOS - 100g,3000 FCFA
Tomate en poudre - 125g,4493 FCFA
Poudre de piment vert - 125g,5247 FCFA
Poudre de piment rouge - 125g,4493 FCFA
Poisson séché - 1kg,9825 FCFA
Crevette séchée - 1kg,16375 FCFA";

/// Product images are served from this path prefix.
pub const PRODUCTS_BASE: &str = "/products";

/// Fallback Unsplash photo ids, one pool per category.
pub const POOL_OIL: &[&str] = &[
    "photo-1611080626919-7cf5a9dbab5b",
    "photo-1608571423902-eed4a5ad8108",
    "photo-1620916566398-39f1143ab7be",
    "photo-1544161515-4af6b1d4738c",
    "photo-1612531388305-643037233868",
    "photo-1544161513-0179fe746fd5",
];

pub const POOL_BUTTER: &[&str] = &[
    "photo-1590159357421-44754a10874e",
    "photo-1596755094514-f87e34085b2c",
    "photo-1556228720-195a672e8a03",
];

pub const POOL_POWDER: &[&str] = &[
    "photo-1515255384510-333066917637",
    "photo-1542618953-274e6459146c",
    "photo-1542618953-b295c2f8149f",
];

pub const POOL_FLOUR: &[&str] = &[
    "photo-1509440159596-0249088772ff",
    "photo-1628840042765-356cda07504e",
    "photo-1574323347407-f5e1ad6d020b",
    "photo-1601526714465-bdd38c2b83ff",
];

pub const POOL_PRESERVE: &[&str] = &[
    "photo-1599598938194-c9d8c20b1a89",
    "photo-1619566636858-adf3ef46400b",
    "photo-1573855619003-97b4799dcd8b",
];

pub const POOL_CEREAL: &[&str] = &[
    "photo-1586201375761-83865001e31c",
    "photo-1518977676601-b53f82aba655",
    "photo-1604908176997-125f25cc6f3d",
    "photo-1612528443702-f6741f70a049",
];

pub const POOL_SPICE: &[&str] = &[
    "photo-1596040008851-e229b5a73c57",
    "photo-1599909533301-8a6b7c6c3e88",
    "photo-1506368249639-73a05d6f6488",
    "photo-1587411768390-609139b54d5e",
    "photo-1596040008853-f1b5b4b0b1b7",
];

pub const POOL_FISH: &[&str] = &[
    "photo-1534604973900-c43ab4c2e0ab",
    "photo-1504973960431-1c467e159aa4",
    "photo-1559737558-2f5a35ab38c1",
];

/// Local product photos, keyed by name slug. Preferred over Unsplash.
pub const LOCAL_IMAGES: &[(&str, &str)] = &[
    ("huile-de-neem-pressee-a-froid", "huile-de-neem.jpg"),
    ("huile-d-avocat-extra-vierge", "huile-d-avocat.jpg"),
    ("beurre-de-karite-brut", "beurre-de-karite.jpg"),
    ("huile-de-ricin-pressee-a-froid", "huile-de-ricin.jpg"),
    ("huile-de-palmiste-brute", "huile-de-palmiste.jpg"),
    ("huile-de-coco-pressee-a-froid", "huile-de-coco.jpg"),
    ("huile-de-tournesol-extra-vierge", "huile-de-tournesol.jpg"),
    ("huile-de-baobab-pressee-a-froid", "huile-de-baobab.jpg"),
    ("huile-de-soja-extra-vierge", "huile-de-soja.jpg"),
    ("huile-de-nigelle-pressee-a-froid", "huile-de-nigelle.jpg"),
    ("huile-d-hibiscus-pure", "huile-d-hibiscuit.jpg"),
    ("huile-de-carotte-pure", "huile-de-carotte.jpg"),
    ("huile-de-fenugrec-pressee-a-froid", "huile-de-fenugrec.jpg"),
    ("huile-d-akpi-pressee-a-froid", "huile-d-akpi.jpg"),
    ("poudre-de-moringa-naturelle", "poudre-de-moringa.jpg"),
    ("poudre-de-neem-naturelle", "poudre-de-neem.jpg"),
    ("huile-de-moringa-pressee-a-froid", "huile-de-moringa.jpg"),
    ("huile-de-sesame-pressee-a-froid", "huile-de-sesame.jpg"),
    ("poudre-de-baobab-tamisee-en-vrac", "poudre-de-baobab.jpg"),
    ("huile-rouge-500ml", "huile-rouge.jpg"),
    ("igname-frais-1kg", "igname-frais.jpg"),
    (
        "kluiklui-galette-d-arachide-croustillante-300g",
        "klui-klui.jpg",
    ),
    ("noix-d-acajou-1kg", "noix-d-acajou.jpg"),
    ("pomme-de-terre-1kg", "pomme-de-terre.jpg"),
    ("aklui-de-sorgho-600g", "aklui-de-sorgho.jpg"),
    ("farine-de-mais-1kg", "farine-de-mais.jpg"),
    ("farine-de-telibor-cosette-d-igname-1kg", "farine-de-telibo.jpg"),
    ("aklui-de-mais-600g", "aklui-de-mais.jpg"),
    ("aklui-de-mil-600g", "aklui-de-mil.jpg"),
    ("farine-de-agbeli-600g", "farine-de-agbeli.jpg"),
    ("farine-de-riz-ablo-500g", "farine-de-riz.jpg"),
    ("farine-de-mawe-mais-600g", "farine-de-mawe.jpg"),
    ("farine-de-akassa-600g", "farine-de-akassa.jpg"),
    ("farine-de-ata-gbaza-300g", "farine-de-ata-gbaza.jpg"),
    ("farine-de-adowe-300g", "farine-de-adowe.jpg"),
    ("farine-de-mawe-sorgho-600g", "farine-de-mawe-sorgho.jpg"),
    ("tagliatelle-au-manioc", "tigatelle-au-manioc.jpg"),
    ("piment-rouge-de-table-500g", "piment-rouge-de-table.jpg"),
    ("ognon-1kg", "oignon.jpg"),
    ("ail-1-sachet", "ail.jpg"),
    ("graine-de-chia", "graine-de-chia.jpg"),
    ("piment-vert-de-table-500g", "piment-vert-de-table.jpg"),
    ("lanhouiwin-100g", "lanhouihouin.jpg"),
    ("puree-de-tomate-yon-na-1kg", "puree-de-tomate.jpg"),
    ("sel-de-mer-fin-iode-la-baleine-125g", "sel-de-mer-fin-iodee.jpg"),
    ("persil-seche", "persil-seche.jpg"),
    ("piment-noir-de-kom-600g", "piment-noir-come.jpg"),
    ("poudre-de-cannelle", "poudre-de-carnelle.jpg"),
    ("poivre-blanc-bio-moulu", "poivre-blanc-moulu.jpg"),
    ("poivre-noir-bio-moulu", "poivre-noir-moulu.jpg"),
    ("graine-d-anis-vert", "graine-d-anis-vert.jpg"),
    ("gingembre-en-poudre-bio", "gimgembre-en-poudre.jpg"),
    ("monodara-myristica-epices", "monodora-myristica-epices.jpg"),
    ("puree-de-tomate-yon-na-500g", "puree-de-tomate (2).jpg"),
    ("thym-seche", "teem-seche.jpg"),
    ("poudre-de-piment-rouge-125g", "poudre-de-piment-rouge.jpg"),
    ("poudre-de-piment-vert-125g", "poudre-de-piment-vert.jpg"),
    ("tomate-en-poudre-125g", "poudre-de-tomate.jpg"),
];
