use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dua {
    pub arabic: &'static str,
    pub translation: &'static str,
    pub reference: &'static str,
}

/// Quranic dua shown for `date`; cycles through the collection by day of year.
pub fn dua_of_the_day(date: NaiveDate) -> &'static Dua {
    let idx = date.ordinal0() as usize % DUAS.len();
    &DUAS[idx]
}

const DUAS: &[Dua] = &[
    Dua {
        arabic: "رَبَّنَا تَقَبَّلْ مِنَّا ۖ إِنَّكَ أَنتَ السَّمِيعُ الْعَلِيمُ",
        translation: "Our Lord, accept this from us. Indeed, You are the Hearing, the Knowing.",
        reference: "Quran 2:127",
    },
    Dua {
        arabic: "رَبَّنَا آتِنَا فِي الدُّنْيَا حَسَنَةً وَفِي الْآخِرَةِ حَسَنَةً وَقِنَا عَذَابَ النَّارِ",
        translation: "Our Lord, give us good in this world and good in the Hereafter and protect us from the punishment of the Fire.",
        reference: "Quran 2:201",
    },
    Dua {
        arabic: "رَبَّنَا أَفْرِغْ عَلَيْنَا صَبْرًا وَثَبِّتْ أَقْدَامَنَا وَانصُرْنَا عَلَى الْقَوْمِ الْكَافِرِينَ",
        translation: "Our Lord, pour upon us patience and plant firmly our feet and give us victory over the disbelieving people.",
        reference: "Quran 2:250",
    },
    Dua {
        arabic: "رَبَّنَا لَا تُؤَاخِذْنَا إِن نَّسِينَا أَوْ أَخْطَأْنَا",
        translation: "Our Lord, do not impose blame upon us if we have forgotten or erred.",
        reference: "Quran 2:286",
    },
    Dua {
        arabic: "رَبَّنَا وَلَا تَحْمِلْ عَلَيْنَا إِصْرًا كَمَا حَمَلْتَهُ عَلَى الَّذِينَ مِن قَبْلِنَا",
        translation: "Our Lord, and lay not upon us a burden like that which You laid upon those before us.",
        reference: "Quran 2:286",
    },
    Dua {
        arabic: "رَبَّنَا وَلَا تُحَمِّلْنَا مَا لَا طَاقَةَ لَنَا بِهِ",
        translation: "Our Lord, and burden us not with that which we have no ability to bear.",
        reference: "Quran 2:286",
    },
    Dua {
        arabic: "رَبَّنَا لَا تُزِغْ قُلُوبَنَا بَعْدَ إِذْ هَدَيْتَنَا وَهَبْ لَنَا مِن لَّدُنكَ رَحْمَةً",
        translation: "Our Lord, let not our hearts deviate after You have guided us and grant us from Yourself mercy.",
        reference: "Quran 3:8",
    },
    Dua {
        arabic: "رَبَّنَا إِنَّنَا آمَنَّا فَاغْفِرْ لَنَا ذُنُوبَنَا وَقِنَا عَذَابَ النَّارِ",
        translation: "Our Lord, indeed we have believed, so forgive us our sins and protect us from the punishment of the Fire.",
        reference: "Quran 3:16",
    },
    Dua {
        arabic: "رَبَّنَا آمَنَّا بِمَا أَنزَلْتَ وَاتَّبَعْنَا الرَّسُولَ فَاكْتُبْنَا مَعَ الشَّاهِدِينَ",
        translation: "Our Lord, we have believed in what You revealed and have followed the messenger, so register us among the witnesses.",
        reference: "Quran 3:53",
    },
    Dua {
        arabic: "رَبَّنَا اغْفِرْ لَنَا ذُنُوبَنَا وَإِسْرَافَنَا فِي أَمْرِنَا وَثَبِّتْ أَقْدَامَنَا وَانصُرْنَا عَلَى الْقَوْمِ الْكَافِرِينَ",
        translation: "Our Lord, forgive us our sins and the excess in our affairs and plant firmly our feet and give us victory over the disbelieving people.",
        reference: "Quran 3:147",
    },
    Dua {
        arabic: "رَبَّنَا مَا خَلَقْتَ هَٰذَا بَاطِلًا سُبْحَانَكَ فَقِنَا عَذَابَ النَّارِ",
        translation: "Our Lord, You did not create this in vain; exalted are You. Protect us from the punishment of the Fire.",
        reference: "Quran 3:191",
    },
    Dua {
        arabic: "رَبَّنَا إِنَّكَ مَن تُدْخِلِ النَّارَ فَقَدْ أَخْزَيْتَهُ ۖ وَمَا لِلظَّالِمِينَ مِنْ أَنصَارٍ",
        translation: "Our Lord, indeed whoever You admit to the Fire - You have disgraced him, and for the wrongdoers there are no helpers.",
        reference: "Quran 3:192",
    },
    Dua {
        arabic: "رَبَّنَا إِنَّنَا سَمِعْنَا مُنَادِيًا يُنَادِي لِلْإِيمَانِ أَنْ آمِنُوا بِرَبِّكُمْ فَآمَنَّا",
        translation: "Our Lord, indeed we have heard a caller calling to faith, [saying], 'Believe in your Lord,' and we have believed.",
        reference: "Quran 3:193",
    },
    Dua {
        arabic: "رَبَّنَا فَاغْفِرْ لَنَا ذُنُوبَنَا وَكَفِّرْ عَنَّا سَيِّئَاتِنَا وَتَوَفَّنَا مَعَ الْأَبْرَارِ",
        translation: "Our Lord, so forgive us our sins and remove from us our misdeeds and cause us to die with the righteous.",
        reference: "Quran 3:193",
    },
    Dua {
        arabic: "رَبَّنَا وَآتِنَا مَا وَعَدتَّنَا عَلَىٰ رُسُلِكَ وَلَا تُخْزِنَا يَوْمَ الْقِيَامَةِ",
        translation: "Our Lord, and grant us what You promised us through Your messengers and do not disgrace us on the Day of Resurrection.",
        reference: "Quran 3:194",
    },
    Dua {
        arabic: "رَبَّنَا ظَلَمْنَا أَنفُسَنَا وَإِن لَّمْ تَغْفِرْ لَنَا وَتَرْحَمْنَا لَنَكُونَنَّ مِنَ الْخَاسِرِينَ",
        translation: "Our Lord, we have wronged ourselves, and if You do not forgive us and have mercy upon us, we will surely be among the losers.",
        reference: "Quran 7:23",
    },
    Dua {
        arabic: "رَبَّنَا افْتَحْ بَيْنَنَا وَبَيْنَ قَوْمِنَا بِالْحَقِّ وَأَنتَ خَيْرُ الْفَاتِحِينَ",
        translation: "Our Lord, decide between us and our people in truth, and You are the best of those who give decision.",
        reference: "Quran 7:89",
    },
    Dua {
        arabic: "رَبَّنَا أَفْرِغْ عَلَيْنَا صَبْرًا وَتَوَفَّنَا مُسْلِمِينَ",
        translation: "Our Lord, pour upon us patience and let us die as Muslims [in submission to You].",
        reference: "Quran 7:126",
    },
    Dua {
        arabic: "رَبَّنَا لَا تَجْعَلْنَا مَعَ الْقَوْمِ الظَّالِمِينَ",
        translation: "Our Lord, do not place us with the wrongdoing people.",
        reference: "Quran 7:47",
    },
    Dua {
        arabic: "حَسْبُنَا اللَّهُ وَنِعْمَ الْوَكِيلُ",
        translation: "Sufficient for us is Allah, and [He is] the best Disposer of affairs.",
        reference: "Quran 3:173",
    },
    Dua {
        arabic: "رَبَّنَا اغْفِرْ لِي وَلِوَالِدَيَّ وَلِلْمُؤْمِنِينَ يَوْمَ يَقُومُ الْحِسَابُ",
        translation: "Our Lord, forgive me and my parents and the believers the Day the account is established.",
        reference: "Quran 14:41",
    },
    Dua {
        arabic: "رَّبِّ اجْعَلْنِي مُقِيمَ الصَّلَاةِ وَمِن ذُرِّيَّتِي ۚ رَبَّنَا وَتَقَبَّلْ دُعَاءِ",
        translation: "My Lord, make me an establisher of prayer, and from my descendants. Our Lord, and accept my supplication.",
        reference: "Quran 14:40",
    },
    Dua {
        arabic: "رَبِّ هَبْ لِي حُكْمًا وَأَلْحِقْنِي بِالصَّالِحِينَ",
        translation: "My Lord, grant me authority and join me with the righteous.",
        reference: "Quran 26:83",
    },
    Dua {
        arabic: "رَبِّ نَجِّنِي وَأَهْلِي مِمَّا يَعْمَلُونَ",
        translation: "My Lord, save me and my family from what they do.",
        reference: "Quran 26:169",
    },
    Dua {
        arabic: "رَبِّ أَوْزِعْنِي أَنْ أَشْكُرَ نِعْمَتَكَ الَّتِي أَنْعَمْتَ عَلَيَّ وَعَلَىٰ وَالِدَيَّ",
        translation: "My Lord, enable me to be grateful for Your favor which You have bestowed upon me and upon my parents.",
        reference: "Quran 27:19",
    },
    Dua {
        arabic: "لَّا إِلَٰهَ إِلَّا أَنتَ سُبْحَانَكَ إِنِّي كُنتُ مِنَ الظَّالِمِينَ",
        translation: "There is no deity except You; exalted are You. Indeed, I have been of the wrongdoers.",
        reference: "Quran 21:87",
    },
    Dua {
        arabic: "رَبِّ لَا تَذَرْنِي فَرْدًا وَأَنتَ خَيْرُ الْوَارِثِينَ",
        translation: "My Lord, do not leave me alone, and You are the best of inheritors.",
        reference: "Quran 21:89",
    },
    Dua {
        arabic: "رَبَّنَا آتِنَا مِن لَّدُنكَ رَحْمَةً وَهَيِّئْ لَنَا مِنْ أَمْرِنَا رَشَدًا",
        translation: "Our Lord, grant us from Yourself mercy and prepare for us from our affair right guidance.",
        reference: "Quran 18:10",
    },
    Dua {
        arabic: "رَبِّ اشْرَحْ لِي صَدْرِي وَيَسِّرْ لِي أَمْرِي",
        translation: "My Lord, expand for me my chest and ease for me my task.",
        reference: "Quran 20:25-26",
    },
];
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_day_same_dua() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(dua_of_the_day(date), dua_of_the_day(date));
    }

    #[test]
    fn test_consecutive_days_rotate() {
        let first = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let second = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        assert_eq!(dua_of_the_day(first).reference, "Quran 2:127");
        assert_ne!(dua_of_the_day(first), dua_of_the_day(second));
    }
}
