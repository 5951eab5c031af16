use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdhkarCategory {
    Morning,
    Evening,
    General,
}

impl AdhkarCategory {
    pub fn all() -> [AdhkarCategory; 3] {
        [AdhkarCategory::Morning, AdhkarCategory::Evening, AdhkarCategory::General]
    }

    pub fn title(&self) -> &'static str {
        match self {
            AdhkarCategory::Morning => "Morning",
            AdhkarCategory::Evening => "Evening",
            AdhkarCategory::General => "General",
        }
    }

    pub fn next(&self) -> AdhkarCategory {
        match self {
            AdhkarCategory::Morning => AdhkarCategory::Evening,
            AdhkarCategory::Evening => AdhkarCategory::General,
            AdhkarCategory::General => AdhkarCategory::Morning,
        }
    }

    pub fn prev(&self) -> AdhkarCategory {
        match self {
            AdhkarCategory::Morning => AdhkarCategory::General,
            AdhkarCategory::Evening => AdhkarCategory::Morning,
            AdhkarCategory::General => AdhkarCategory::Evening,
        }
    }
}

impl FromStr for AdhkarCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" | "sabah" => Ok(AdhkarCategory::Morning),
            "evening" | "masa" => Ok(AdhkarCategory::Evening),
            "general" => Ok(AdhkarCategory::General),
            _ => Err(anyhow::anyhow!("Unknown adhkar category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub arabic: &'static str,
    pub translation: &'static str,
    pub reference: &'static str,
    pub repeat: u32,
}

impl Entry {
    /// "Repeat 3 times", or nothing for a single recitation.
    pub fn repeat_label(&self) -> Option<String> {
        if self.repeat > 1 {
            Some(format!("Repeat {} times", self.repeat))
        } else {
            None
        }
    }
}

pub fn adhkar_for(category: AdhkarCategory) -> &'static [Entry] {
    match category {
        AdhkarCategory::Morning => MORNING,
        AdhkarCategory::Evening => EVENING,
        AdhkarCategory::General => GENERAL,
    }
}

const MORNING: &[Entry] = &[
    Entry {
        arabic: "أَصْـبَحْنا وَأَصْـبَحَ المُـلْكُ لله وَالحَمدُ لله، لا إلهَ إلاّ اللّهُ وَحدَهُ لا شَريكَ لهُ، لهُ المُـلكُ ولهُ الحَمْـد، وهُوَ على كلّ شيءٍ قدير",
        translation: "We have reached the morning and at this very time unto Allah belongs all sovereignty, and all praise is for Allah. None has the right to be worshipped except Allah, alone, without partner, to Him belongs all sovereignty and praise and He is over all things omnipotent.",
        reference: "Muslim",
        repeat: 1,
    },
    Entry {
        arabic: "اللّهُـمَّ بِكَ أَصْـبَحْنا وَبِكَ أَمْسَـينا ، وَبِكَ نَحْـيا وَبِكَ نَمُـوتُ وَإِلَـيْكَ النُّـشُور",
        translation: "O Allah, by You we enter the morning and by You we enter the evening, by You we live and by You we die, and to You is the Final Return.",
        reference: "Tirmidhi",
        repeat: 1,
    },
    Entry {
        arabic: "اللّهُـمَّ إِنِّـي أَسْـأَلُـكَ العَـفْوَ وَالعَـافِـيةَ في الدُّنْـيا وَالآخِـرَة، اللّهُـمَّ إِنِّـي أَسْـأَلُـكَ العَـفْوَ وَالعَـافِـيةَ في ديني وَدُنْـيايَ وَأَهْـلي وَمالـي",
        translation: "O Allah, I ask You for pardon and well-being in this life and the next. O Allah, I ask You for pardon and well-being in my religious and worldly affairs, and my family and my wealth.",
        reference: "Ibn Majah",
        repeat: 1,
    },
    Entry {
        arabic: "اللّهُـمَّ إِنِّـي أَعـوذُ بِكَ مِنَ الْكُـفر ، وَالفَـقْر ، وَأَعـوذُ بِكَ مِنْ عَذابِ القَـبْر ، لا إلهَ إلاّ أَنْـتَ",
        translation: "O Allah, I take refuge in You from disbelief and poverty, and I take refuge in You from the punishment of the grave. None has the right to be worshipped except You.",
        reference: "Abu Dawud",
        repeat: 3,
    },
    Entry {
        arabic: "اللّهُـمَّ عافِـني في بَدَنـي ، اللّهُـمَّ عافِـني في سَمْـعي ، اللّهُـمَّ عافِـني في بَصَـري ، لا إلهَ إلاّ أَنْـتَ",
        translation: "O Allah, grant my body health, O Allah, grant my hearing health, O Allah, grant my sight health. None has the right to be worshipped except You.",
        reference: "Abu Dawud",
        repeat: 3,
    },
    Entry {
        arabic: "حَسْبِـيَ اللّهُ لا إلهَ إلاّ هُوَ عَلَـيهِ تَوَكَّـلتُ وَهُوَ رَبُّ العَرْشِ العَظـيم",
        translation: "Allah is sufficient for me, none has the right to be worshipped except Him, upon Him I rely and He is Lord of the exalted throne.",
        reference: "Abu Dawud",
        repeat: 7,
    },
    Entry {
        arabic: "أَعـوذُ بِكَلِمـاتِ اللّهِ التّـامّـاتِ مِنْ شَـرِّ ما خَلَـق",
        translation: "I take refuge in Allah's perfect words from the evil of what He has created.",
        reference: "Muslim",
        repeat: 3,
    },
];

const EVENING: &[Entry] = &[
    Entry {
        arabic: "أَمْسَيْـنا وَأَمْسـى المُـلْكُ للهِ وَالحَمدُ لله ، لا إلهَ إلاّ اللّهُ وَحدَهُ لا شَريكَ لهُ، لهُ المُـلكُ ولهُ الحَمْـد، وهُوَ على كلّ شيءٍ قدير",
        translation: "We have reached the evening and at this very time unto Allah belongs all sovereignty, and all praise is for Allah. None has the right to be worshipped except Allah, alone, without partner, to Him belongs all sovereignty and praise and He is over all things omnipotent.",
        reference: "Muslim",
        repeat: 1,
    },
    Entry {
        arabic: "اللّهُـمَّ بِكَ أَمْسَـينا، وَبِكَ أَصْـبَحْنا، وَبِكَ نَحْـيا، وَبِكَ نَمُـوتُ وَإِلَـيْكَ المَصِيرُ",
        translation: "O Allah, by Your leave we have reached the evening and by Your leave we have reached the morning, by Your leave we live and die and unto You is our return.",
        reference: "Tirmidhi",
        repeat: 1,
    },
    Entry {
        arabic: "اللّهُـمَّ ما أَمسى بي مِـنْ نِعْـمَةٍ أَو بِأَحَـدٍ مِـنْ خَلْـقِك ، فَمِـنْكَ وَحْـدَكَ لا شريكَ لَـك ، فَلَـكَ الْحَمْـدُ وَلَـكَ الشُّكْـر",
        translation: "O Allah, what blessing I have received in this evening or any of Your creation, is from You alone, without partner, so for You is all praise and unto You all thanks.",
        reference: "Abu Dawud",
        repeat: 1,
    },
    Entry {
        arabic: "اللّهُـمَّ إِنِّـي أَمسيتُ أُشْـهِدُك ، وَأُشْـهِدُ حَمَلَـةَ عَـرْشِـك ، وَمَلَائِكَتَكَ ، وَجَمـيعَ خَلْـقِك ، أَنَّـكَ أَنْـتَ اللهُ لا إلهَ إلاّ أَنْـتَ وَحْـدَكَ لا شَريكَ لَـك ، وَأَنَّ ُ مُحَمّـداً عَبْـدُكَ وَرَسـولُـك",
        translation: "O Allah, verily I have reached the evening and call on You, Your bearers of Your throne, Your angels, and all of Your creation to witness that You are Allah, none has the right to be worshipped except You, alone, without partner and that Muhammad is Your servant and Your Messenger.",
        reference: "Abu Dawud",
        repeat: 1,
    },
    Entry {
        arabic: "اللّهُـمَّ إِنِّـي أَعـوذُ بِكَ مِنَ الْكُـفر ، وَالفَـقْر ، وَأَعـوذُ بِكَ مِنْ عَذابِ القَـبْر ، لا إلهَ إلاّ أَنْـتَ",
        translation: "O Allah, I take refuge in You from disbelief and poverty, and I take refuge in You from the punishment of the grave. None has the right to be worshipped except You.",
        reference: "Abu Dawud",
        repeat: 3,
    },
    Entry {
        arabic: "أَعـوذُ بِكَلِمـاتِ اللّهِ التّـامّـاتِ مِنْ شَـرِّ ما خَلَـق",
        translation: "I take refuge in Allah's perfect words from the evil of what He has created.",
        reference: "Muslim",
        repeat: 3,
    },
];

const GENERAL: &[Entry] = &[
    Entry {
        arabic: "لا إلهَ إلاّ اللّهُ وحدَهُ لا شريكَ لهُ، لهُ المُلكُ ولهُ الحَمدُ وهوَ على كلّ شيءٍ قدير",
        translation: "None has the right to be worshipped except Allah, alone, without partner. To Him belongs all sovereignty and praise and He is over all things omnipotent.",
        reference: "Bukhari, Muslim",
        repeat: 10,
    },
    Entry {
        arabic: "سُبْحـانَ اللهِ وَبِحَمْـدِهِ",
        translation: "Glory is to Allah and praise is to Him.",
        reference: "Muslim",
        repeat: 100,
    },
    Entry {
        arabic: "أسْتَغْفِرُ اللهَ وَأتُوبُ إلَيْهِ",
        translation: "I seek the forgiveness of Allah and repent to Him.",
        reference: "Bukhari",
        repeat: 100,
    },
    Entry {
        arabic: "سُبْحَانَ اللَّهِ وَبِحَمْدِهِ ، سُبْحَانَ اللَّهِ الْعَظِيمِ",
        translation: "Glory is to Allah and praise is to Him, Glory is to Allah the Immense.",
        reference: "Muslim",
        repeat: 10,
    },
    Entry {
        arabic: "لَا إِلَهَ إِلَّا اللَّهُ وَحْدَهُ لَا شَرِيكَ لَهُ، لَهُ الْمُلْكُ، وَلَهُ الْحَمْدُ، وَهُوَ عَلَى كُلِّ شَيْءٍ قَدِيرٌ، لَا حَوْلَ وَلَا قُوَّةَ إِلَّا بِاللَّهِ",
        translation: "None has the right to be worshipped except Allah, alone, without partner. To Him belongs all sovereignty and praise. He is over all things omnipotent. There is no might nor power except with Allah.",
        reference: "Tirmidhi",
        repeat: 10,
    },
    Entry {
        arabic: "اللَّهُمَّ صَلِّ عَلَى مُحَمَّدٍ وَعَلَى آلِ مُحَمَّدٍ كَمَا صَلَّيْتَ عَلَى إِبْرَاهِيمَ وَعَلَى آلِ إِبْرَاهِيمَ إِنَّكَ حَمِيدٌ مَجِيدٌ",
        translation: "O Allah, send prayers upon Muhammad and the followers of Muhammad, just as You sent prayers upon Ibrahim and the followers of Ibrahim. Verily, You are full of praise and majesty.",
        reference: "Bukhari",
        repeat: 10,
    },
];
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_entries() {
        for category in AdhkarCategory::all() {
            assert!(!adhkar_for(category).is_empty());
        }
    }

    #[test]
    fn test_repeat_label() {
        let single = adhkar_for(AdhkarCategory::Morning)[0];
        assert_eq!(single.repeat_label(), None);
        let tasbih = adhkar_for(AdhkarCategory::General)
            .iter()
            .find(|e| e.repeat == 100)
            .unwrap();
        assert_eq!(tasbih.repeat_label().as_deref(), Some("Repeat 100 times"));
    }

    #[test]
    fn test_category_cycle() {
        let c = AdhkarCategory::Morning;
        assert_eq!(c.next().next().next(), c);
        assert_eq!(c.prev(), AdhkarCategory::General);
        assert_eq!("Evening".parse::<AdhkarCategory>().unwrap(), AdhkarCategory::Evening);
    }
}
